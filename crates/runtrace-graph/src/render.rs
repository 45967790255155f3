//! Text rendering for provenance trees.
//!
//! Pure functions of the tree. Each node renders its label on one line,
//! then its children, indented by a fixed margin behind a connector glyph
//! that differs between fan-in (`^`) and fan-out (`|`) so a printed tree
//! shows its direction at a glance.

use std::fmt;

use runtrace_types::shell;

use crate::tree::{CommandNode, Direction, FileNode};

impl fmt::Display for FileNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_file(self))
    }
}

impl fmt::Display for CommandNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_command(self))
    }
}

fn render_file(node: &FileNode) -> String {
    let path = node.record.path.display();
    // The trailing slash is the literal marker for a file that could not
    // be hashed (missing or not a regular file).
    let mut out = if node.record.digest.is_empty() {
        format!("{}/", path)
    } else {
        format!("{} {}", path, node.record.digest.short())
    };

    let connector = match node.direction {
        Direction::FanOut => "\n|-- ",
        Direction::FanIn => "\n^-- ",
    };
    push_children(&mut out, connector, node.children.iter().map(render_command));
    out
}

fn render_command(node: &CommandNode) -> String {
    let mut out = shell::join(&node.entry.command);

    let connector = match node.direction {
        Direction::FanOut => "\n|-->",
        Direction::FanIn => "\n^---",
    };
    push_children(&mut out, connector, node.children.iter().map(render_file));
    out
}

fn push_children<I>(out: &mut String, connector: &str, children: I)
where
    I: Iterator<Item = String>,
{
    let rendered: Vec<String> = children
        .map(|child| child.replace('\n', "\n    "))
        .collect();
    if rendered.is_empty() {
        return;
    }
    out.push_str(connector);
    out.push_str(&rendered.join(connector));
}

#[cfg(test)]
mod tests {
    use super::*;
    use runtrace_types::{CommandEntry, Digest, FileRecord};

    fn digest(fill: char) -> Digest {
        Digest::new(std::iter::repeat(fill).take(32).collect::<String>())
    }

    fn file_node(path: &str, digest: Digest, direction: Direction) -> FileNode {
        FileNode::new(FileRecord::new(path, digest), direction)
    }

    fn command_node(argv: &[&str], direction: Direction) -> CommandNode {
        CommandNode::new(
            CommandEntry::new(argv.iter().map(|s| s.to_string()).collect()),
            direction,
        )
    }

    #[test]
    fn leaf_renders_label_only() {
        let node = file_node("a.txt", digest('a'), Direction::FanIn);
        assert_eq!(node.to_string(), "a.txt aaaaaaaaaaaaaaaa");
    }

    #[test]
    fn unhashable_file_gets_literal_marker() {
        let node = file_node("gone.bin", Digest::empty(), Direction::FanIn);
        assert_eq!(node.to_string(), "gone.bin/");
    }

    #[test]
    fn command_label_is_shell_quoted() {
        let node = command_node(&["echo", "hello world"], Direction::FanOut);
        assert_eq!(node.to_string(), "echo 'hello world'");
    }

    #[test]
    fn fan_in_connectors() {
        let mut anchor = file_node("/dev/stdout", digest('b'), Direction::FanIn);
        let mut command = command_node(&["cat", "a.txt"], Direction::FanIn);
        command
            .children
            .push(file_node("a.txt", digest('a'), Direction::FanIn));
        anchor.children.push(command);

        insta::assert_snapshot!(anchor.to_string(), @r"
        /dev/stdout bbbbbbbbbbbbbbbb
        ^-- cat a.txt
            ^---a.txt aaaaaaaaaaaaaaaa
        ");
    }

    #[test]
    fn fan_out_connectors() {
        let mut anchor = file_node("seed", digest('5'), Direction::FanOut);
        let mut step_one = command_node(&["step-one"], Direction::FanOut);
        let mut mid = file_node("mid", digest('6'), Direction::FanOut);
        let mut step_two = command_node(&["step-two"], Direction::FanOut);
        step_two
            .children
            .push(file_node("final", digest('7'), Direction::FanOut));
        mid.children.push(step_two);
        step_one.children.push(mid);
        anchor.children.push(step_one);

        insta::assert_snapshot!(anchor.to_string(), @r"
        seed 5555555555555555
        |-- step-one
            |-->mid 6666666666666666
                |-- step-two
                    |-->final 7777777777777777
        ");
    }

    #[test]
    fn rendering_is_pure() {
        let mut anchor = file_node("a", digest('a'), Direction::FanIn);
        anchor.children.push(command_node(&["tool"], Direction::FanIn));
        assert_eq!(anchor.to_string(), anchor.to_string());
    }
}
