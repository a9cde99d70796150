//! Task tags (`TODO`, `FIXME`, ...) found in comments.

use astbridge_core::TaskTagOptions;
use astbridge_host::TaskMarker;
use astbridge_source::Comment;

#[derive(Debug)]
struct TaskEntry<'a> {
    tag: &'a str,
    tag_index: usize,
    start: i32,
    end: i32,
    message: String,
    /// Index of the entry starting right after this tag.
    adjacent_to: Option<usize>,
}

/// Every task marker in `comments`, comment by comment.
pub fn scan_tasks(comments: &[Comment], options: &TaskTagOptions) -> Vec<TaskMarker> {
    comments
        .iter()
        .flat_map(|comment| scan_comment(comment, options))
        .collect()
}

/// Markers of one comment, with overlapping entries trimmed.
///
/// Tags are reported in option order, each tag's occurrences left to right.
pub fn scan_comment(comment: &Comment, options: &TaskTagOptions) -> Vec<TaskMarker> {
    let mut entries = Vec::new();
    for (tag_index, tag) in options.tags.iter().enumerate() {
        if tag.is_empty() {
            continue;
        }
        entries.extend(occurrences(comment, tag, tag_index, options.case_sensitive));
    }

    for i in 0..entries.len() {
        for j in 0..entries.len() {
            if i == j {
                continue;
            }
            if entries[i].start + entries[i].tag.len() as i32 + 1 == entries[j].start {
                entries[i].adjacent_to = Some(j);
            } else if end_of(&entries, i) > entries[j].start && entries[i].start < entries[j].start
            {
                entries[i].end = entries[j].start - 1;
            } else if end_of(&entries, j) > entries[i].start && entries[j].start < entries[i].start
            {
                entries[j].end = entries[i].start - 1;
            }
        }
    }

    (0..entries.len())
        .map(|index| {
            let entry = &entries[index];
            let reported = last_adjacent(&entries, index);
            TaskMarker {
                tag: entry.tag.to_string(),
                message: entries[reported].message.clone(),
                priority: options.priority_of(entry.tag_index).map(str::to_string),
                start: entry.start,
                end: entries[reported].end,
            }
        })
        .collect()
}

/// Follows adjacency to the entry whose text and end are reported.
fn last_adjacent(entries: &[TaskEntry<'_>], mut index: usize) -> usize {
    // adjacency always points forward in the text, so this terminates; the
    // bound guards against two tags sharing a start offset
    for _ in 0..entries.len() {
        match entries[index].adjacent_to {
            Some(next) => index = next,
            None => break,
        }
    }
    index
}

fn end_of(entries: &[TaskEntry<'_>], index: usize) -> i32 {
    entries[last_adjacent(entries, index)].end
}

fn occurrences<'a>(
    comment: &Comment,
    tag: &'a str,
    tag_index: usize,
    case_sensitive: bool,
) -> Vec<TaskEntry<'a>> {
    let (haystack, needle) = if case_sensitive {
        (comment.text.clone(), tag.to_string())
    } else {
        (
            comment.text.to_ascii_lowercase(),
            tag.to_ascii_lowercase(),
        )
    };

    haystack
        .match_indices(&needle)
        .map(|(index, _)| {
            let start = comment.start + index as i32;
            let after = index + tag.len();
            let rest = &comment.text[after..];
            let line = rest.split(['\n', '\r']).next().unwrap_or_default();
            let body = line.trim_end();
            let body = body.strip_suffix("*/").unwrap_or(body).trim_end();
            let leading = body.len() - body.trim_start().len();
            let message = body.trim_start();
            let end = if message.is_empty() {
                start + tag.len() as i32 - 1
            } else {
                comment.start + (after + leading + message.len()) as i32 - 1
            };
            TaskEntry {
                tag,
                tag_index,
                start,
                end,
                message: message.to_string(),
                adjacent_to: None,
            }
        })
        .collect()
}
