//! Generates the box-drawing representation of a directory hierarchy.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::{FileItem, ScanOptions};

/// A utility struct for generating an ASCII directory tree.
///
/// This struct is stateless and provides methods as associated functions.
pub struct TreeGenerator;

impl TreeGenerator {
    /// Renders the hierarchy of `files` below `root_path`.
    ///
    /// The first line names the root folder. Folders are listed before files and
    /// each group is sorted by name. When `options` narrow the file set by
    /// extension, folders left without any visible content are omitted.
    pub fn generate(files: &[FileItem], root_path: &Path, options: &ScanOptions) -> String {
        let mut tree_map = HashMap::new();
        let mut top_level = Vec::new();

        for file in files {
            let relative_path = file.path.strip_prefix(root_path).unwrap_or(&file.path);
            Self::insert_into_tree(
                &mut tree_map,
                &mut top_level,
                relative_path,
                file.is_directory,
            );
        }

        let root_name = root_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| root_path.to_string_lossy().to_string());

        let mut result = format!("📁 {root_name}\n");
        Self::render_children(
            &tree_map,
            &top_level,
            &mut result,
            "",
            options.prunes_empty_folders(),
        );
        result
    }

    /// Inserts a path and all its ancestors into the tree map structure.
    fn insert_into_tree(
        tree_map: &mut HashMap<PathBuf, TreeNode>,
        top_level: &mut Vec<PathBuf>,
        path: &Path,
        is_directory: bool,
    ) {
        let mut current_path = PathBuf::new();

        for component in path.components() {
            let parent_path = current_path.clone();
            current_path.push(component);

            if tree_map.contains_key(&current_path) {
                continue;
            }

            let is_final = current_path == path;
            tree_map.insert(
                current_path.clone(),
                TreeNode {
                    name: component.as_os_str().to_string_lossy().to_string(),
                    is_directory: if is_final { is_directory } else { true },
                    children: Vec::new(),
                },
            );

            if parent_path.as_os_str().is_empty() {
                top_level.push(current_path.clone());
            } else if let Some(parent_node) = tree_map.get_mut(&parent_path) {
                parent_node.children.push(current_path.clone());
            }
        }
    }

    /// A file is always visible; a folder is visible unless pruning is active and
    /// nothing below it is.
    fn is_visible(tree_map: &HashMap<PathBuf, TreeNode>, path: &Path, prune: bool) -> bool {
        let node = &tree_map[path];
        !node.is_directory
            || !prune
            || node
                .children
                .iter()
                .any(|child| Self::is_visible(tree_map, child, prune))
    }

    /// Renders the visible children of a tree node.
    fn render_children(
        tree_map: &HashMap<PathBuf, TreeNode>,
        children: &[PathBuf],
        result: &mut String,
        prefix: &str,
        prune: bool,
    ) {
        let mut sorted_children: Vec<&PathBuf> = children
            .iter()
            .filter(|path| Self::is_visible(tree_map, path, prune))
            .collect();
        sorted_children.sort_by(|a, b| {
            let a_node = &tree_map[*a];
            let b_node = &tree_map[*b];

            // Directories first, then files
            match (a_node.is_directory, b_node.is_directory) {
                (true, false) => std::cmp::Ordering::Less,
                (false, true) => std::cmp::Ordering::Greater,
                _ => a_node.name.cmp(&b_node.name),
            }
        });

        for (i, path) in sorted_children.iter().enumerate() {
            let node = &tree_map[*path];
            let is_last = i == sorted_children.len() - 1;

            let connector = if is_last { "└── " } else { "├── " };
            let icon = if node.is_directory { "📁 " } else { "📄 " };

            result.push_str(&format!("{prefix}{connector}{icon}{}\n", node.name));

            if !node.children.is_empty() {
                let new_prefix = if is_last {
                    format!("{prefix}    ")
                } else {
                    format!("{prefix}│   ")
                };

                Self::render_children(tree_map, &node.children, result, &new_prefix, prune);
            }
        }
    }
}

/// A transient node used for building the tree.
#[derive(Debug, Clone)]
struct TreeNode {
    name: String,
    is_directory: bool,
    children: Vec<PathBuf>,
}
