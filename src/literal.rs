use regex_syntax::hir::literal::{ExtractKind, Extractor};
use regex_syntax::hir::{Hir, HirKind};
use regex_syntax::parse;

/// If `pattern` matches exactly a finite set of literal strings (a plain
/// alternation such as `iPad|iPhone|iPod`), return that set.
///
/// Returns `None` when the pattern has any non-literal part (anchors and
/// word boundaries included), or when `regex_syntax` cannot parse it at all
/// (look-around and other PCRE-isms); such patterns have to go through a
/// full regex engine.
pub(crate) fn exact_literals(pattern: &str) -> Option<Vec<String>> {
    let hir = parse(pattern).ok()?;
    if !is_plain(&hir) {
        return None;
    }

    let mut extractor = Extractor::new();
    extractor.kind(ExtractKind::Prefix);

    let seq = extractor.extract(&hir);
    if !seq.is_exact() {
        return None;
    }

    let literals = seq.literals()?;
    let mut out = Vec::with_capacity(literals.len());
    for lit in literals {
        if !lit.is_exact() || lit.as_bytes().is_empty() {
            return None;
        }
        out.push(std::str::from_utf8(lit.as_bytes()).ok()?.to_string());
    }

    if out.is_empty() {
        None
    } else {
        Some(out)
    }
}

/// Only literals and the groups, concatenations and alternations built
/// from them. Extraction reports assertions as exact empty strings, so they
/// are rejected here.
fn is_plain(hir: &Hir) -> bool {
    match hir.kind() {
        HirKind::Empty | HirKind::Literal(_) => true,
        HirKind::Capture(group) => is_plain(&group.sub),
        HirKind::Concat(subs) | HirKind::Alternation(subs) => subs.iter().all(is_plain),
        _ => false,
    }
}
