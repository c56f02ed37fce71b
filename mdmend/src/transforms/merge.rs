//! Merges paragraph fragments back into whole paragraphs.
//!
//! # The Problem
//!
//! Document trees that reach the renderer are not always well-formed prose.
//! Upstream producers (line-oriented parsers, HTML-to-markdown converters,
//! CMS export pipelines) routinely split a single authored paragraph into
//! several paragraph nodes: an inline code span ends up alone in its own
//! paragraph, a trailing `)` or `, which …` fragment becomes a sibling
//! block, or a sentence continues in a "new" paragraph because the producer
//! treated a single newline as a paragraph break. Rendering such a tree
//! as-is scatters one sentence across several `<p>` elements.
//!
//! # The Repair
//!
//! [`merge_inline_fragments`] rewrites the tree in place in three passes.
//! Order matters - each pass assumes the previous one has normalized its
//! input:
//!
//! 1. **Tighten list items.** Consecutive inline-only paragraphs inside a
//!    list item are accumulated into one paragraph.
//! 2. **Reattach dangling paragraphs.** An inline-only paragraph that
//!    immediately follows a list, list item, or blockquote is attached to
//!    the last paragraph inside that container and removed from the parent.
//! 3. **Merge loose paragraphs.** Sibling paragraphs are joined when the
//!    second one reads as a continuation of the first (leading closing
//!    punctuation, a leading conjunction, a lowercase start, a lone inline
//!    code span, or a predecessor whose sentence never terminated).
//!
//! All passes share one spacing rule: a single space text node is inserted
//! at the join point only when the characters on both sides of the join are
//! letters or digits. This reconnects words that were split apart without
//! introducing spurious spaces before punctuation.
//!
//! Two guard rails keep the heuristics from eating real structure: nodes
//! whose source positions are more than one line apart are never merged
//! (blank-line-separated paragraphs stay separate), and a paragraph whose
//! trailing inline code has non-blank content never absorbs a following
//! block through the dangling-sentence rule.
//!
//! The transform performs no I/O and cannot fail; unexpected node shapes
//! are left unmerged. Running it a second time on an already-repaired tree
//! changes nothing.

use crate::ast::{plain_text_of, Document, Node, Paragraph, Point, Position, Text};
use crate::transforms::Transform;

/// Leading words that mark a paragraph as the continuation of its
/// predecessor.
const CONTINUATION_CONJUNCTIONS: &[&str] = &["und", "oder", "and", "or"];

/// Leading characters that mark a paragraph as a continuation (closing
/// punctuation never starts a sentence).
const CONTINUATION_LEAD_PUNCTUATION: &[char] = &[',', ':', ';', ')', ']'];

/// Trailing characters that terminate a sentence; a paragraph ending in one
/// of these does not pull the next paragraph in.
const TERMINAL_PUNCTUATION: &[char] = &['.', '!', '?', ')'];

/// Maximum number of source lines between two nodes for them to still count
/// as adjacent. A larger gap means a blank line separated them on purpose.
const MAX_MERGE_LINE_GAP: usize = 1;

/// Transform wrapper around [`merge_inline_fragments`] for use in a
/// [`Pipeline`](crate::transforms::Pipeline).
pub struct MergeInlineFragments;

impl Transform for MergeInlineFragments {
    fn name(&self) -> &str {
        "merge-inline-fragments"
    }

    fn apply(&self, doc: &mut Document) {
        merge_inline_fragments(doc);
    }
}

/// Repairs paragraph-level fragmentation artifacts in a document tree.
///
/// Mutates the tree in place. Idempotent: a second call on the same tree is
/// a no-op.
pub fn merge_inline_fragments(doc: &mut Document) {
    tighten_list_items(&mut doc.children);
    reattach_dangling_paragraphs(&mut doc.children);
    merge_sibling_paragraphs(&mut doc.children);
}

// ---------------------------------------------------------------------------
// Pass 1: tighten list items
// ---------------------------------------------------------------------------

fn tighten_list_items(children: &mut Vec<Node>) {
    for child in children.iter_mut() {
        if let Node::ListItem(item) = child {
            if item.children.len() > 1 {
                merge_adjacent_fragments(&mut item.children);
            }
        }
        if let Some(kids) = child.children_mut() {
            tighten_list_items(kids);
        }
    }
}

/// Accumulates runs of consecutive inline-only paragraphs into a single
/// paragraph. Non-paragraph children pass through unchanged and break the
/// current run.
fn merge_adjacent_fragments(children: &mut Vec<Node>) {
    let old = std::mem::take(children);
    let mut out: Vec<Node> = Vec::with_capacity(old.len());

    for child in old {
        if let Node::Paragraph(fragment) = child {
            let fragment_is_inline_only = fragment.children.iter().all(Node::is_inline);
            if fragment_is_inline_only {
                if let Some(Node::Paragraph(last)) = out.last_mut() {
                    if last.children.iter().all(Node::is_inline)
                        && within_line_gap(last.position.as_ref(), fragment.position.as_ref())
                    {
                        append_paragraph(last, fragment);
                        continue;
                    }
                }
            }
            out.push(Node::Paragraph(fragment));
        } else {
            out.push(child);
        }
    }

    *children = out;
}

// ---------------------------------------------------------------------------
// Pass 2: reattach dangling paragraphs
// ---------------------------------------------------------------------------

fn reattach_dangling_paragraphs(children: &mut Vec<Node>) {
    let mut i = 0;
    while i + 1 < children.len() {
        let attachable = matches!(
            children[i],
            Node::List(_) | Node::ListItem(_) | Node::Blockquote(_)
        );
        if attachable
            && is_inline_only_paragraph(&children[i + 1])
            && within_line_gap(children[i].position(), children[i + 1].position())
        {
            let fragment = match children.remove(i + 1) {
                Node::Paragraph(p) => p,
                other => {
                    children.insert(i + 1, other);
                    i += 1;
                    continue;
                }
            };
            attach_to_container(&mut children[i], fragment);
            // Stay on the same container: another fragment may follow.
            continue;
        }
        i += 1;
    }

    for child in children.iter_mut() {
        if let Some(kids) = child.children_mut() {
            reattach_dangling_paragraphs(kids);
        }
    }
}

/// Attaches a fragment paragraph to the last paragraph found inside the
/// container, creating one when the container holds no paragraph yet.
fn attach_to_container(container: &mut Node, fragment: Paragraph) {
    let fragment_end = fragment.position.map(|p| p.end);
    let leftover = match container.children_mut() {
        Some(children) => append_to_last_paragraph(children, fragment),
        None => Some(fragment),
    };
    if let Some(fragment) = leftover {
        adopt_fragment(container, fragment);
    }
    if let Some(end) = fragment_end {
        container.extend_position_end(end);
    }
}

/// Walks the container's children from the back looking for the last
/// descendant paragraph. Returns the fragment unchanged when none exists.
fn append_to_last_paragraph(children: &mut Vec<Node>, fragment: Paragraph) -> Option<Paragraph> {
    let fragment_end = fragment.position.map(|p| p.end);
    let mut fragment = fragment;

    for child in children.iter_mut().rev() {
        if let Node::Paragraph(target) = child {
            append_paragraph(target, fragment);
            return None;
        }
        if let Some(kids) = child.children_mut() {
            match append_to_last_paragraph(kids, fragment) {
                None => {
                    if let Some(end) = fragment_end {
                        child.extend_position_end(end);
                    }
                    return None;
                }
                Some(unplaced) => fragment = unplaced,
            }
        }
    }

    Some(fragment)
}

/// Places a fragment as a fresh paragraph inside the innermost trailing
/// container, so content that belonged at the end of a nested item lands
/// there rather than at the list level.
fn adopt_fragment(container: &mut Node, fragment: Paragraph) {
    let Some(children) = container.children_mut() else {
        return;
    };
    if let Some(last) = children.last_mut() {
        if matches!(
            last,
            Node::List(_) | Node::ListItem(_) | Node::Blockquote(_)
        ) {
            adopt_fragment(last, fragment);
            return;
        }
    }
    children.push(Node::Paragraph(fragment));
}

// ---------------------------------------------------------------------------
// Pass 3: merge loose paragraphs
// ---------------------------------------------------------------------------

fn merge_sibling_paragraphs(children: &mut Vec<Node>) {
    let mut i = 0;
    let mut active: Option<usize> = None;

    while i < children.len() {
        if !matches!(children[i], Node::Paragraph(_)) {
            // Any non-paragraph sibling ends the current merge run.
            active = None;
            i += 1;
            continue;
        }

        let Some(a) = active else {
            active = Some(i);
            i += 1;
            continue;
        };

        let merge = match (&children[a], &children[i]) {
            (Node::Paragraph(prev), Node::Paragraph(candidate)) => {
                is_continuation(prev, candidate)
            }
            _ => false,
        };

        if merge {
            let fragment = match children.remove(i) {
                Node::Paragraph(p) => p,
                other => {
                    children.insert(i, other);
                    active = Some(i);
                    i += 1;
                    continue;
                }
            };
            if let Node::Paragraph(target) = &mut children[a] {
                append_paragraph(target, fragment);
            }
        } else {
            active = Some(i);
            i += 1;
        }
    }

    for child in children.iter_mut() {
        if let Some(kids) = child.children_mut() {
            merge_sibling_paragraphs(kids);
        }
    }
}

/// Decides whether `candidate` continues `prev`.
///
/// Candidate-side signals (a fragment with no real words, a lone inline
/// code span, leading closing punctuation, a leading conjunction, a
/// lowercase start) each establish continuation on their own. When none
/// fires, a predecessor whose trailing text never reached terminal
/// punctuation pulls the candidate in - unless the predecessor ends in
/// non-blank inline code, which always keeps its block boundary.
fn is_continuation(prev: &Paragraph, candidate: &Paragraph) -> bool {
    if !prev.children.iter().all(Node::is_inline)
        || !candidate.children.iter().all(Node::is_inline)
    {
        return false;
    }
    if !within_line_gap(prev.position.as_ref(), candidate.position.as_ref()) {
        return false;
    }

    let text = plain_text_of(&candidate.children);
    if !text.chars().any(is_word_char) {
        // Empty or punctuation-only: nothing but leftovers of a split.
        return true;
    }
    if is_sole_inline_code(&candidate.children) {
        return true;
    }
    if let Some(first) = first_meaningful_char(&candidate.children) {
        if CONTINUATION_LEAD_PUNCTUATION.contains(&first) {
            return true;
        }
    }
    if starts_with_conjunction(&text) {
        return true;
    }
    if let Some(first) = first_meaningful_char(&candidate.children) {
        if is_lowercase_letter(first) {
            return true;
        }
    }

    if ends_with_nonblank_code(&prev.children) {
        return false;
    }
    match last_meaningful_char(&prev.children) {
        Some(last) => !TERMINAL_PUNCTUATION.contains(&last),
        None => true,
    }
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// A letter or digit in the Latin or extended-Latin range.
fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || (('\u{00C0}'..='\u{024F}').contains(&c) && c != '\u{00D7}' && c != '\u{00F7}')
}

fn is_lowercase_letter(c: char) -> bool {
    is_word_char(c) && c.is_lowercase()
}

fn starts_with_conjunction(text: &str) -> bool {
    let word: String = text
        .trim_start()
        .chars()
        .take_while(|c| c.is_alphabetic())
        .collect();
    !word.is_empty()
        && CONTINUATION_CONJUNCTIONS
            .iter()
            .any(|conj| word.eq_ignore_ascii_case(conj))
}

fn is_inline_only_paragraph(node: &Node) -> bool {
    match node {
        Node::Paragraph(p) => p.children.iter().all(Node::is_inline),
        _ => false,
    }
}

fn is_sole_inline_code(children: &[Node]) -> bool {
    matches!(children, [Node::InlineCode(_)])
}

/// Whether two positioned nodes are close enough to merge. Nodes without
/// position information are treated as adjacent.
fn within_line_gap(prev: Option<&Position>, next: Option<&Position>) -> bool {
    match (prev, next) {
        (Some(prev), Some(next)) => {
            next.start.line.saturating_sub(prev.end.line) <= MAX_MERGE_LINE_GAP
        }
        _ => true,
    }
}

/// Scans backward for the last non-whitespace character carried by an
/// inline sequence, skipping hard breaks and descending into styled spans.
/// Stops at non-textual inlines (images, raw HTML).
fn last_meaningful_char(nodes: &[Node]) -> Option<char> {
    for node in nodes.iter().rev() {
        match node {
            Node::Break(_) => continue,
            Node::Text(t) => {
                if let Some(c) = t.value.chars().rev().find(|c| !c.is_whitespace()) {
                    return Some(c);
                }
            }
            Node::InlineCode(c) => {
                if let Some(ch) = c.value.chars().rev().find(|c| !c.is_whitespace()) {
                    return Some(ch);
                }
            }
            Node::Emphasis(_) | Node::Strong(_) | Node::Strikethrough(_) | Node::Link(_) => {
                if let Some(children) = node.children() {
                    if let Some(c) = last_meaningful_char(children) {
                        return Some(c);
                    }
                }
            }
            _ => return None,
        }
    }
    None
}

/// Forward counterpart of [`last_meaningful_char`].
fn first_meaningful_char(nodes: &[Node]) -> Option<char> {
    for node in nodes {
        match node {
            Node::Break(_) => continue,
            Node::Text(t) => {
                if let Some(c) = t.value.chars().find(|c| !c.is_whitespace()) {
                    return Some(c);
                }
            }
            Node::InlineCode(c) => {
                if let Some(ch) = c.value.chars().find(|c| !c.is_whitespace()) {
                    return Some(ch);
                }
            }
            Node::Emphasis(_) | Node::Strong(_) | Node::Strikethrough(_) | Node::Link(_) => {
                if let Some(children) = node.children() {
                    if let Some(c) = first_meaningful_char(children) {
                        return Some(c);
                    }
                }
            }
            _ => return None,
        }
    }
    None
}

/// Whether the paragraph's trailing meaningful node is inline code with
/// non-blank content.
fn ends_with_nonblank_code(children: &[Node]) -> bool {
    for node in children.iter().rev() {
        match node {
            Node::Break(_) => continue,
            Node::Text(t) if t.value.trim().is_empty() => continue,
            Node::InlineCode(c) => return !c.value.trim().is_empty(),
            _ => return false,
        }
    }
    false
}

/// Appends a fragment's inline children to the target paragraph, inserting
/// a single joining space only when the characters on both sides of the
/// join are letters or digits. Extends the target's recorded end position
/// so subsequent adjacency checks see the merged extent.
fn append_paragraph(target: &mut Paragraph, fragment: Paragraph) {
    if needs_joining_space(&target.children, &fragment.children) {
        target.children.push(Node::Text(Text {
            value: " ".to_string(),
            position: None,
        }));
    }
    let fragment_end = fragment.position.map(|p| p.end);
    target.children.extend(fragment.children);
    if let (Some(position), Some(end)) = (target.position.as_mut(), fragment_end) {
        extend_end(position, end);
    }
}

fn needs_joining_space(left: &[Node], right: &[Node]) -> bool {
    match (last_meaningful_char(left), first_meaningful_char(right)) {
        (Some(l), Some(r)) => is_word_char(l) && is_word_char(r),
        _ => false,
    }
}

fn extend_end(position: &mut Position, end: Point) {
    if end.line > position.end.line
        || (end.line == position.end.line && end.column > position.end.column)
    {
        position.end = end;
    }
}
