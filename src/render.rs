//! Render a namespace tree as TypeScript declaration text.

use crate::ast::{Field, Interface, Method, QualifiedName};
use crate::hierarchy::Namespace;

/// Options for rendering.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Maximum width of comment text, not counting indentation and `// `.
    pub comment_width: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { comment_width: 80 }
    }
}

impl RenderOptions {
    pub fn with_comment_width(mut self, width: usize) -> Self {
        self.comment_width = width;
        self
    }
}

/// Render the tree, followed by the `declare const` binding for `main`.
pub fn render(root: &Namespace, main: &QualifiedName, options: &RenderOptions) -> String {
    let mut renderer = Renderer::new(options);
    renderer.emit_namespace(root, 0);
    renderer.output.push('\n');
    renderer.output.push_str(&format!(
        "declare const {}: {};\n",
        main.local_name(),
        main
    ));
    renderer.output
}

/// Word-wrap comment text. Paragraph breaks in the source are kept; blank
/// source lines become empty entries. Words longer than `width` are not split.
/// Text without any words produces no lines.
pub fn wrap_comment(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    if text.trim().is_empty() {
        return lines;
    }
    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            if !current.is_empty() && current.len() + 1 + word.len() > width {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
        lines.push(current);
    }
    lines
}

struct Renderer<'a> {
    options: &'a RenderOptions,
    output: String,
}

impl<'a> Renderer<'a> {
    fn new(options: &'a RenderOptions) -> Self {
        Self {
            options,
            output: String::new(),
        }
    }

    fn line(&mut self, depth: usize, text: &str) {
        let line = format!("{}{}", "  ".repeat(depth), text);
        self.output.push_str(line.trim_end());
        self.output.push('\n');
    }

    fn emit_comment(&mut self, depth: usize, comment: Option<&str>) {
        let Some(comment) = comment else {
            return;
        };
        for text in wrap_comment(comment, self.options.comment_width) {
            self.line(depth, &format!("// {text}"));
        }
    }

    fn emit_namespace(&mut self, namespace: &Namespace, depth: usize) {
        let keyword = if depth == 0 {
            "declare namespace"
        } else {
            "namespace"
        };
        self.line(depth, &format!("{keyword} {} {{", namespace.local_name()));
        for child in namespace.children.values() {
            self.emit_namespace(child, depth + 1);
        }
        for interface in &namespace.interfaces {
            self.emit_interface(interface, depth + 1);
        }
        self.line(depth, "}");
    }

    fn emit_interface(&mut self, interface: &Interface, depth: usize) {
        self.emit_comment(depth, interface.comment.as_deref());
        self.line(
            depth,
            &format!("export interface {} {{", interface.local_name()),
        );
        for field in &interface.fields {
            self.emit_field(field, depth + 1);
        }
        for method in &interface.methods {
            self.emit_method(method, depth + 1);
        }
        self.line(depth, "}");
    }

    fn emit_field(&mut self, field: &Field, depth: usize) {
        self.emit_comment(depth, field.comment.as_deref());
        self.line(depth, &format!("{}?: {};", field.name, field.ty));
    }

    fn emit_method(&mut self, method: &Method, depth: usize) {
        self.emit_comment(depth, method.comment.as_deref());
        let params = method
            .params
            .iter()
            .map(|p| format!("{}: {}", p.name, p.ty))
            .collect::<Vec<_>>()
            .join(", ");
        self.line(
            depth,
            &format!("{}({}): {};", method.name, params, method.return_type),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> QualifiedName {
        QualifiedName::parse(s).unwrap()
    }

    fn sample_tree() -> Namespace {
        let mut root = Namespace::new(name("GoogleAppsScript"));
        root.insert(Interface {
            name: name("GoogleAppsScript.Tasks.Schema.Task"),
            fields: vec![Field {
                name: "title".to_string(),
                ty: "string".to_string(),
                comment: Some("Title of the task.".to_string()),
            }],
            methods: Vec::new(),
            comment: None,
        });
        root.insert(Interface {
            name: name("GoogleAppsScript.Tasks"),
            fields: Vec::new(),
            methods: vec![
                Method {
                    name: "newTask".to_string(),
                    return_type: "Tasks.Schema.Task".to_string(),
                    params: Vec::new(),
                    comment: Some("Create a new Task.".to_string()),
                },
                Method {
                    name: "move".to_string(),
                    return_type: "void".to_string(),
                    params: vec![
                        Field {
                            name: "tasklist".to_string(),
                            ty: "string".to_string(),
                            comment: None,
                        },
                        Field {
                            name: "task".to_string(),
                            ty: "string".to_string(),
                            comment: None,
                        },
                    ],
                    comment: None,
                },
            ],
            comment: Some("Tasks service.".to_string()),
        });
        root
    }

    #[test]
    fn renders_nested_tree() {
        let tree = sample_tree();
        let out = render(&tree, &name("GoogleAppsScript.Tasks"), &RenderOptions::default());
        let expected = "\
declare namespace GoogleAppsScript {
  namespace Tasks {
    namespace Schema {
      export interface Task {
        // Title of the task.
        title?: string;
      }
    }
  }
  // Tasks service.
  export interface Tasks {
    // Create a new Task.
    newTask(): Tasks.Schema.Task;
    move(tasklist: string, task: string): void;
  }
}

declare const Tasks: GoogleAppsScript.Tasks;
";
        assert_eq!(out, expected);
    }

    #[test]
    fn rendering_is_repeatable() {
        let tree = sample_tree();
        let main = name("GoogleAppsScript.Tasks");
        let options = RenderOptions::default();
        assert_eq!(render(&tree, &main, &options), render(&tree, &main, &options));
    }

    #[test]
    fn empty_root_still_renders() {
        let tree = Namespace::new(name("GoogleAppsScript"));
        let out = render(&tree, &name("GoogleAppsScript.Main"), &RenderOptions::default());
        assert_eq!(
            out,
            "declare namespace GoogleAppsScript {\n}\n\ndeclare const Main: GoogleAppsScript.Main;\n"
        );
    }

    #[test]
    fn wraps_long_comments() {
        let lines = wrap_comment("one two three four five", 9);
        assert_eq!(lines, vec!["one two", "three", "four five"]);
    }

    #[test]
    fn keeps_paragraphs_and_long_words() {
        let lines = wrap_comment("first\n\nsupercalifragilistic word", 5);
        assert_eq!(lines, vec!["first", "", "supercalifragilistic", "word"]);
    }

    #[test]
    fn whitespace_only_comment_is_omitted() {
        assert!(wrap_comment("   ", 80).is_empty());
        assert!(wrap_comment("\n\n", 80).is_empty());

        let mut tree = Namespace::new(name("Root"));
        tree.insert(Interface {
            name: name("Root.Tasks"),
            fields: vec![Field {
                name: "title".to_string(),
                ty: "string".to_string(),
                comment: Some(" \t ".to_string()),
            }],
            methods: Vec::new(),
            comment: Some("   ".to_string()),
        });
        let out = render(&tree, &name("Root.Tasks"), &RenderOptions::default());
        assert!(!out.contains("//"), "{out}");
        assert!(out.contains("declare namespace Root {\n  export interface Tasks {\n    title?: string;\n"));
    }

    #[test]
    fn blank_comment_lines_have_no_trailing_space() {
        let mut tree = Namespace::new(name("Root"));
        tree.insert(Interface {
            name: name("Root.X"),
            fields: Vec::new(),
            methods: Vec::new(),
            comment: Some("a\n\nb".to_string()),
        });
        let out = render(&tree, &name("Root.X"), &RenderOptions::default());
        assert!(out.contains("  // a\n  //\n  // b\n"), "{out}");
    }
}
