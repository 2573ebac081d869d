//! Outline forest construction.

use crate::model::{LeveledHeading, OutlineNode};

/// Nest a flat, document-ordered heading list into a forest.
///
/// The builder keeps a stack of open headings. A heading at level `L` first
/// closes open headings until at most `L - 1` remain, then becomes a child of
/// the innermost one still open, or a root when none is. Skipped levels are
/// nested directly (an H3 right after an H1 becomes its child) and nothing is
/// ever rejected.
pub fn build_outline(headings: &[LeveledHeading]) -> Vec<OutlineNode> {
    let mut roots: Vec<OutlineNode> = Vec::new();
    let mut open: Vec<OutlineNode> = Vec::new();

    for heading in headings {
        let depth = heading.level.rank().saturating_sub(1) as usize;
        while open.len() > depth {
            close_top(&mut open, &mut roots);
        }
        open.push(OutlineNode::from(heading));
    }

    while !open.is_empty() {
        close_top(&mut open, &mut roots);
    }

    roots
}

/// Pop the innermost open node and attach it to its parent or the forest.
fn close_top(open: &mut Vec<OutlineNode>, roots: &mut Vec<OutlineNode>) {
    if let Some(node) = open.pop() {
        match open.last_mut() {
            Some(parent) => parent.children.push(node),
            None => roots.push(node),
        }
    }
}
