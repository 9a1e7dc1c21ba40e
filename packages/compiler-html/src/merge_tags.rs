use mailcraft_model::MergeTag;

/// Replace every occurrence of each tag name with its value.
///
/// Tags are applied one after another in table order, so a value that
/// contains a later tag's name is replaced again. Tags with an empty name are
/// skipped.
pub fn substitute_merge_tags(text: &str, tags: &[MergeTag]) -> String {
    let mut out = text.to_string();
    for tag in tags {
        if tag.name.is_empty() || !out.contains(&tag.name) {
            continue;
        }
        out = out.replace(&tag.name, &tag.value);
    }
    out
}
