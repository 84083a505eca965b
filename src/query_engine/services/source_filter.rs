use crate::query_engine::domain::ComponentRef;

/// Keeps the component references whose purl mentions `component_type`
///
/// The registry has no server-side filter for the type of a source, so the
/// match is done here: a case-insensitive substring match against the purl.
/// `None` or a blank type keeps every reference. The result is sorted by purl
/// and de-duplicated.
pub fn filter_sources(sources: &[ComponentRef], component_type: Option<&str>) -> Vec<ComponentRef> {
    let needle = component_type
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase);

    let mut kept: Vec<ComponentRef> = sources
        .iter()
        .filter(|source| match &needle {
            Some(needle) => source.purl.to_lowercase().contains(needle.as_str()),
            None => true,
        })
        .cloned()
        .collect();

    kept.sort_by(|a, b| a.purl.cmp(&b.purl).then_with(|| a.link.cmp(&b.link)));
    kept.dedup();
    kept
}
