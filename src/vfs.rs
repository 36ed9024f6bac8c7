use std::collections::BTreeMap;
use thiserror::Error;

/// Home directory of the simulated user; `~` expands to this.
pub const HOME: &str = "/home/user";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VfsError {
    #[error("No such file or directory")]
    NotFound,
    #[error("Not a directory")]
    NotADirectory,
    #[error("File exists")]
    AlreadyExists,
}

/// In-memory filesystem node. No symlinks, no cycles; paths always resolve
/// from the root downward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VfsNode {
    File { content: String },
    Dir { children: BTreeMap<String, VfsNode> },
}

impl VfsNode {
    pub fn is_dir(&self) -> bool {
        matches!(self, VfsNode::Dir { .. })
    }

    /// Synthetic byte size shown by `ls -l`: content length for files,
    /// 4096 for directories.
    pub fn size(&self) -> usize {
        match self {
            VfsNode::File { content } => content.len(),
            VfsNode::Dir { .. } => 4096,
        }
    }
}

fn file(content: &str) -> VfsNode {
    VfsNode::File {
        content: content.to_string(),
    }
}

fn dir(entries: Vec<(&str, VfsNode)>) -> VfsNode {
    VfsNode::Dir {
        children: entries
            .into_iter()
            .map(|(name, node)| (name.to_string(), node))
            .collect(),
    }
}

/// The virtual filesystem owned by the engine. Mutated only by `mkdir`;
/// read by `ls`/`cat`/`cd` and tab completion.
#[derive(Debug, Clone)]
pub struct Vfs {
    root: VfsNode,
}

impl Default for Vfs {
    fn default() -> Self {
        Self::new()
    }
}

impl Vfs {
    pub fn new() -> Self {
        Self { root: seed_tree() }
    }

    /// Resolve an absolute, already-normalized path to a node.
    pub fn resolve(&self, path: &str) -> Option<&VfsNode> {
        let mut node = &self.root;
        for part in path.split('/').filter(|p| !p.is_empty()) {
            match node {
                VfsNode::Dir { children } => node = children.get(part)?,
                VfsNode::File { .. } => return None,
            }
        }
        Some(node)
    }

    /// Expand a target path against a cwd into an absolute path. Handles
    /// absolute paths, `~`, `~/x`, `.`, `..`, and plain relative segments.
    /// `..` at the root is silently dropped.
    pub fn normalize(cwd: &str, target: &str) -> String {
        if target.starts_with('/') {
            return target.to_string();
        }
        if let Some(rest) = target.strip_prefix("~/") {
            return format!("{HOME}/{rest}");
        }
        if target == "~" {
            return HOME.to_string();
        }

        let mut parts: Vec<&str> = cwd.split('/').filter(|p| !p.is_empty()).collect();
        for part in target.split('/').filter(|p| !p.is_empty()) {
            match part {
                ".." => {
                    parts.pop();
                }
                "." => {}
                other => parts.push(other),
            }
        }
        format!("/{}", parts.join("/"))
    }

    /// Create a directory named `name` under `cwd`.
    pub fn mkdir(&mut self, cwd: &str, name: &str) -> Result<(), VfsError> {
        let Some(VfsNode::Dir { children }) = self.resolve_mut(cwd) else {
            // cwd vanished from under the pane; nothing sensible to do
            return Ok(());
        };
        if children.contains_key(name) {
            return Err(VfsError::AlreadyExists);
        }
        children.insert(
            name.to_string(),
            VfsNode::Dir {
                children: BTreeMap::new(),
            },
        );
        Ok(())
    }

    fn resolve_mut(&mut self, path: &str) -> Option<&mut VfsNode> {
        let mut node = &mut self.root;
        for part in path.split('/').filter(|p| !p.is_empty()) {
            match node {
                VfsNode::Dir { children } => node = children.get_mut(part)?,
                VfsNode::File { .. } => return None,
            }
        }
        Some(node)
    }
}

/// The starter tree every fresh engine begins with.
fn seed_tree() -> VfsNode {
    dir(vec![(
        "home",
        dir(vec![(
            "user",
            dir(vec![
                (
                    "projects",
                    dir(vec![
                        (
                            "myapp",
                            dir(vec![
                                (
                                    "src",
                                    dir(vec![
                                        (
                                            "index.ts",
                                            file(
                                                "import { createApp } from \"./app\";\n\nconst app = createApp();\napp.listen(3000, () => {\n  console.log(\"Server running on port 3000\");\n});\n",
                                            ),
                                        ),
                                        (
                                            "utils.ts",
                                            file(
                                                "export function formatDate(d: Date): string {\n  return d.toISOString().split(\"T\")[0];\n}\n\nexport function sleep(ms: number): Promise<void> {\n  return new Promise(resolve => setTimeout(resolve, ms));\n}\n",
                                            ),
                                        ),
                                    ]),
                                ),
                                (
                                    "package.json",
                                    file(
                                        "{\n  \"name\": \"myapp\",\n  \"version\": \"1.0.0\",\n  \"main\": \"src/index.ts\",\n  \"scripts\": {\n    \"start\": \"ts-node src/index.ts\",\n    \"build\": \"tsc\",\n    \"test\": \"jest\"\n  },\n  \"dependencies\": {\n    \"express\": \"^4.18.2\"\n  }\n}\n",
                                    ),
                                ),
                                (
                                    "README.md",
                                    file(
                                        "# My App\n\nA simple Node.js application.\n\n## Getting Started\n\n```bash\nnpm install\nnpm start\n```\n",
                                    ),
                                ),
                            ]),
                        ),
                        (
                            "website",
                            dir(vec![
                                (
                                    "index.html",
                                    file(
                                        "<!DOCTYPE html>\n<html>\n<head><title>My Website</title></head>\n<body>\n  <h1>Hello World</h1>\n</body>\n</html>\n",
                                    ),
                                ),
                                (
                                    "style.css",
                                    file(
                                        "body {\n  font-family: sans-serif;\n  margin: 2rem;\n  background: #1a1a2e;\n  color: #eee;\n}\n",
                                    ),
                                ),
                            ]),
                        ),
                    ]),
                ),
                (
                    "documents",
                    dir(vec![(
                        "notes.txt",
                        file(
                            "Meeting notes - 2024-01-15\n\n- Review Q4 results\n- Plan sprint goals\n- Update documentation\n",
                        ),
                    )]),
                ),
                (
                    ".bashrc",
                    file(
                        "# ~/.bashrc\nexport PS1=\"\\u@\\h:\\w$ \"\nexport EDITOR=vim\nalias ll=\"ls -la\"\nalias gs=\"git status\"\n",
                    ),
                ),
                (
                    ".tmux.conf",
                    file(
                        "# General\n# Set prefix to Ctrl+a (alternative to Ctrl+b)\n# unbind C-b\n# set -g prefix C-a\n# bind C-a send-prefix\n\n# Enable mouse support\nset -g mouse on\n\n# Start window numbering at 1\nset -g base-index 1\nsetw -g pane-base-index 1\n\n# Increase scrollback buffer\nset -g history-limit 10000\n\n# Reduce escape time\nset -sg escape-time 0\n\n# Key bindings: split panes with | and -\nbind | split-window -h -c \"#{pane_current_path}\"\nbind - split-window -v -c \"#{pane_current_path}\"\n\n# Reload config\nbind r source-file ~/.tmux.conf \\; display \"Config reloaded!\"\n\n# Status bar\nset -g status-style 'bg=#1a7f37 fg=#ffffff'\nset -g status-left ' [#S] '\nset -g status-right ' %H:%M '\n\n# Active pane border\nset -g pane-active-border-style 'fg=#3fb950'\nset -g pane-border-style 'fg=#30363d'\n\n# Colors\nset -g default-terminal \"screen-256color\"\n",
                    ),
                ),
            ]),
        )]),
    )])
}
