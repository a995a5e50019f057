//! Doc comment block selection.
//!
//! swc hands us every comment that precedes a token, including ones separated
//! from it by blank lines. A doc block is the contiguous run of comments
//! directly above a declaration: a blank line anywhere breaks the run.
//!
//! ```ts
//! // Copyright header        <- file doc (first run, followed by a blank line)
//!
//! // unrelated note          <- dropped
//!
//! // UserService client      <- doc block of UserService
//! // @HttpClient
//! export interface UserService {}
//! ```

use swc_common::{
    SourceMap,
    comments::{Comment, CommentKind},
};

/// Rebuild the comment as written, marker included.
pub fn comment_literal(comment: &Comment) -> String {
    match comment.kind {
        CommentKind::Line => format!("//{}", comment.text),
        CommentKind::Block => format!("/*{}*/", comment.text),
    }
}

/// Comment runs not interrupted by a blank line, in source order.
fn split_runs<'c>(comments: &'c [Comment], source_map: &SourceMap) -> Vec<&'c [Comment]> {
    let mut runs = Vec::new();
    let mut start = 0;

    for (i, pair) in comments.windows(2).enumerate() {
        let prev_end = source_map.lookup_char_pos(pair[0].span.hi).line;
        let next_start = source_map.lookup_char_pos(pair[1].span.lo).line;
        if next_start > prev_end + 1 {
            runs.push(&comments[start..=i]);
            start = i + 1;
        }
    }
    if start < comments.len() {
        runs.push(&comments[start..]);
    }
    runs
}

fn abuts(run: &[Comment], node_line: usize, source_map: &SourceMap) -> bool {
    run.last()
        .map(|last| node_line <= source_map.lookup_char_pos(last.span.hi).line + 1)
        .unwrap_or(false)
}

/// The doc block of a node on `node_line`, given the comments attached to it.
pub fn doc_block<'c>(
    comments: &'c [Comment],
    node_line: usize,
    source_map: &SourceMap,
) -> &'c [Comment] {
    match split_runs(comments, source_map).pop() {
        Some(run) if abuts(run, node_line, source_map) => run,
        _ => &[],
    }
}

/// The file doc block.
///
/// `comments` are the comments before the first token of the file and
/// `first_decl_line` the line of the first item when that item is a recorded
/// type declaration. The first run is the file doc unless it is the doc block
/// of that declaration.
pub fn file_doc_block<'c>(
    comments: &'c [Comment],
    first_decl_line: Option<usize>,
    source_map: &SourceMap,
) -> &'c [Comment] {
    let runs = split_runs(comments, source_map);
    let Some(first) = runs.first().copied() else {
        return &[];
    };
    match first_decl_line {
        Some(line) if runs.len() == 1 && abuts(first, line, source_map) => &[],
        _ => first,
    }
}
