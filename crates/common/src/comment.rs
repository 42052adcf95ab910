//! Comment records and the render-ready indented thread form.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};

/// One comment attached to a media item, possibly replying to another
/// comment (tree structure).
///
/// Raw records are immutable once constructed; the rendering layer works
/// from the flattened [`IndentedComment`] form instead.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    /// Unique numeric identifier, assigned by the remote authority.
    pub id: i64,
    /// Stable id of the media item this comment belongs to.
    pub media_id: String,
    /// Parent comment id. Absent for top-level comments. References may
    /// arrive out of order; consumers must tolerate ids that resolve later
    /// or never.
    pub parent_id: Option<i64>,
    /// Creation timestamp, seconds since epoch.
    pub created: i64,
    /// Last-edited timestamp, absent if never edited.
    pub edited: Option<i64>,
    /// Author user id.
    pub user_id: String,
    /// Author display name.
    pub username: String,
    /// Comment body text.
    pub comment: String,
    /// Position within the media, format opaque to this layer.
    pub timecode: Option<String>,
    /// Serialized vector overlay, opaque to this layer.
    pub drawing: Option<String>,
}

impl Comment {
    /// Check that `edited`, when present, does not precede `created`.
    ///
    /// The remote authority enforces this; the state store stores records
    /// verbatim and never calls it. Producer test suites use it to assert
    /// they never violate the invariant locally.
    pub fn validate(&self) -> ModelResult<()> {
        if let Some(edited) = self.edited {
            if edited < self.created {
                return Err(ModelError::EditedBeforeCreated {
                    comment_id: self.id,
                    created: self.created,
                    edited,
                });
            }
        }
        Ok(())
    }
}

/// A comment paired with its nesting depth, ready for rendering.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IndentedComment {
    pub comment: Comment,
    /// Nesting depth, 0 for top-level comments.
    pub indent: u32,
}

/// Flatten raw records into display order: top-level comments in input
/// order, each followed by its replies depth-first, replies likewise in
/// input order.
///
/// Tolerant of malformed input rather than strict: a comment whose
/// `parent_id` resolves to no comment in the slice is rendered at the top
/// level instead of being dropped, and parent cycles are broken, so every
/// input record appears in the output exactly once.
pub fn indent_comment_tree(comments: &[Comment]) -> Vec<IndentedComment> {
    let known: HashSet<i64> = comments.iter().map(|c| c.id).collect();

    let mut roots: Vec<usize> = Vec::new();
    let mut children: HashMap<i64, Vec<usize>> = HashMap::new();
    for (idx, comment) in comments.iter().enumerate() {
        match comment.parent_id {
            Some(parent) if parent != comment.id && known.contains(&parent) => {
                children.entry(parent).or_default().push(idx);
            }
            // No parent, or a parent this batch cannot resolve.
            _ => roots.push(idx),
        }
    }

    let mut out = Vec::with_capacity(comments.len());
    let mut emitted: HashSet<i64> = HashSet::with_capacity(comments.len());
    for &root in &roots {
        emit_subtree(comments, &children, &mut emitted, &mut out, root);
    }
    // Members of a parent cycle are unreachable from any root; surface them
    // as top-level rather than dropping them.
    for idx in 0..comments.len() {
        if !emitted.contains(&comments[idx].id) {
            emit_subtree(comments, &children, &mut emitted, &mut out, idx);
        }
    }
    out
}

fn emit_subtree(
    comments: &[Comment],
    children: &HashMap<i64, Vec<usize>>,
    emitted: &mut HashSet<i64>,
    out: &mut Vec<IndentedComment>,
    start: usize,
) {
    let mut stack = vec![(start, 0u32)];
    while let Some((idx, depth)) = stack.pop() {
        let comment = &comments[idx];
        if !emitted.insert(comment.id) {
            continue;
        }
        out.push(IndentedComment {
            comment: comment.clone(),
            indent: depth,
        });
        if let Some(kids) = children.get(&comment.id) {
            // Reversed so replies pop in input order.
            for &kid in kids.iter().rev() {
                stack.push((kid, depth + 1));
            }
        }
    }
}
