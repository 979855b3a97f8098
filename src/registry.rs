//! Known advanced service definitions and irregular type overrides.
//!
//! The registry is a plain value handed to the normalizer. The built-in
//! table covers the Apps Script advanced services; user configuration can
//! add entries or replace them by id.

use indexmap::IndexMap;
use serde::Deserialize;

/// URL prefix shared by every autocomplete definition endpoint.
const AUTOCOMPLETE_BASE: &str = "https://script.google.com/macros/autocomplete/dep/apiary";

/// An advanced service definition.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Definition {
    /// Public identifier, also the default global variable name (e.g. `People`).
    pub id: String,
    /// Internal package name used by the vendor (e.g. `Peopleapi_v1`).
    pub inner_name: Option<String>,
    /// Internal abbreviated prefix, including the trailing dot (e.g. `Peopleapi.V1.`).
    pub abbreviated_name: Option<String>,
    /// Where the raw definition JSON is downloaded from.
    pub url: String,
}

impl Definition {
    /// Full package prefix, `inner_name.abbreviated_name`, when both are known.
    pub fn qualified_prefix(&self) -> Option<String> {
        match (&self.inner_name, &self.abbreviated_name) {
            (Some(inner), Some(abbrev)) => Some(format!("{inner}.{abbrev}")),
            _ => None,
        }
    }
}

// (id, inner name, abbreviated name, url path below AUTOCOMPLETE_BASE)
const BUILTIN_DEFINITIONS: &[(&str, Option<&str>, Option<&str>, &str)] = &[
    ("AdSense", Some("Adsense_v1_4"), Some("Adsense.V1_4."), "adsense/v1.4"),
    ("AdminDirectory", Some("Admin_directory_v1"), Some("Admin.Directory_v1."), "admin/directory_v1"),
    ("AdminReports", Some("Admin_reports_v1"), Some("Admin.Reports_v1."), "admin/reports_v1"),
    ("AnalyticsReporting", Some("Analyticsreporting_v4"), Some("Analyticsreporting.V4."), "analyticsreporting/v4"),
    ("Area120Tables", Some("Area120tables_v1alpha1"), Some("Area120tables.V1alpha1."), "area120tables/v1alpha1"),
    ("BigQuery", Some("Bigquery_v2"), Some("Bigquery.V2."), "bigquery/v2"),
    ("Calendar", Some("Calendar_v3"), Some("Calendar.V3."), "calendar/v3"),
    ("DoubleClickCampaigns", Some("Dfareporting_v3_4"), Some("Dfareporting.V3_4."), "dfareporting/v3.4"),
    ("ShoppingContent", Some("Content_v2"), Some("Content.V2."), "content/v2"),
    ("Drive", Some("Drive_v2"), Some("Drive.V2."), "drive/v2"),
    ("DriveActivity", Some("Driveactivity_v2"), Some("Driveactivity.V2."), "driveactivity/v2"),
    ("AdminLicenseManager", Some("Licensing_v1"), Some("Licensing.V1."), "licensing/v1"),
    ("Gmail", Some("Gmail_v1"), Some("Gmail.V1."), "gmail/v1"),
    ("Analytics", Some("Analytics_v3"), Some("Analytics.V3."), "analytics/v3"),
    ("Classroom", Some("Classroom_v1"), Some("Classroom.V1."), "classroom/v1"),
    ("Docs", Some("Docs_v1"), Some("Docs.V1."), "docs/v1"),
    ("Sheets", Some("Sheets_v4"), Some("Sheets.V4."), "sheets/v4"),
    ("Slides", Some("Slides_v1"), Some("Slides.V1."), "slides/v1"),
    ("AdminReseller", Some("Reseller_v1"), Some("Reseller.V1."), "reseller/v1"),
    ("AdminGroupsMigration", Some("Groupsmigration_v1"), Some("Groupsmigration.V1."), "groupsmigration/v1"),
    ("AdminGroupsSettings", Some("Groupssettings_v1"), Some("Groupssettings.V1."), "groupssettings/v1"),
    // The vendor publishes no internal names for Mirror.
    ("Mirror", None, None, "mirror/v1"),
    ("People", Some("Peopleapi_v1"), Some("Peopleapi.V1."), "peopleapi/v1"),
    ("TagManager", Some("Tagmanager_v2"), Some("Tagmanager.V2."), "tagmanager/v2"),
    ("Tasks", Some("Tasks_v1"), Some("Tasks.V1."), "tasks/v1"),
    ("YouTubeAnalytics", Some("YoutubeAnalytics_v2"), Some("YoutubeAnalytics.V2."), "youtubeAnalytics/v2"),
    ("YouTubeContentId", Some("YoutubePartner_v1"), Some("YoutubePartner.V1."), "youtubePartner/v1"),
    ("YouTube", Some("Youtube_v3"), Some("Youtube.V3."), "youtube/v3"),
];

/// Vendor types whose declared shape is wrong or has no useful counterpart.
const BUILTIN_IRREGULAR: &[(&str, &str)] = &[
    ("Bigquery_v2.Bigquery.V2.Schema.JsonValue", "any"),
    ("Bigquery.V2.Schema.JsonValue", "any"),
    ("Classroom_v1.Classroom.V1.Schema.Empty", "void"),
    ("Classroom.V1.Schema.Empty", "void"),
    ("Peopleapi_v1.Peopleapi.V1.Schema.Empty", "void"),
    ("Peopleapi.V1.Schema.Empty", "void"),
];

/// Read-only lookup tables consumed by the normalizer.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    definitions: Vec<Definition>,
    irregular: IndexMap<String, String>,
}

impl Registry {
    /// An empty registry. Mostly useful for tests with small fixed tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in table of advanced services and known irregular types.
    pub fn builtin() -> Self {
        let definitions = BUILTIN_DEFINITIONS
            .iter()
            .map(|&(id, inner, abbrev, path)| Definition {
                id: id.to_string(),
                inner_name: inner.map(String::from),
                abbreviated_name: abbrev.map(String::from),
                url: format!("{AUTOCOMPLETE_BASE}/{path}"),
            })
            .collect();
        let irregular = BUILTIN_IRREGULAR
            .iter()
            .map(|&(token, ty)| (token.to_string(), ty.to_string()))
            .collect();
        Self {
            definitions,
            irregular,
        }
    }

    /// Add a definition, replacing any existing entry with the same id.
    pub fn with_definition(mut self, definition: Definition) -> Self {
        self.add_definition(definition);
        self
    }

    /// Add an irregular type override.
    pub fn with_irregular(mut self, token: impl Into<String>, ty: impl Into<String>) -> Self {
        self.irregular.insert(token.into(), ty.into());
        self
    }

    /// Add a definition in place, replacing any existing entry with the same id.
    pub fn add_definition(&mut self, definition: Definition) {
        match self.definitions.iter_mut().find(|d| d.id == definition.id) {
            Some(existing) => *existing = definition,
            None => self.definitions.push(definition),
        }
    }

    /// Merge irregular overrides; later entries win.
    pub fn extend_irregular<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.irregular.extend(entries);
    }

    /// All definitions in registry order.
    pub fn definitions(&self) -> &[Definition] {
        &self.definitions
    }

    /// Look up a definition by its public id.
    pub fn find(&self, id: &str) -> Option<&Definition> {
        self.definitions.iter().find(|d| d.id == id)
    }

    /// The override registered for an irregular vendor type, if any.
    pub fn irregular(&self, token: &str) -> Option<&str> {
        self.irregular.get(token).map(String::as_str)
    }
}
