//! OPC part-name helpers for relationship targets.

/// Part name of the relationship set belonging to `part`
/// (`xl/worksheets/sheet1.xml` -> `xl/worksheets/_rels/sheet1.xml.rels`).
pub fn rels_for_part(part: &str) -> String {
    match part.rsplit_once('/') {
        Some((dir, file_name)) => format!("{dir}/_rels/{file_name}.rels"),
        None => format!("_rels/{part}.rels"),
    }
}

/// Resolve a relationship `target` against the part that owns the relationship.
pub fn resolve_target(source_part: &str, target: &str) -> String {
    // Part names never carry URI fragments.
    let target = target.split('#').next().unwrap_or(target);
    if target.is_empty() {
        return normalize(source_part);
    }
    if let Some(target) = target.strip_prefix('/') {
        return normalize(target);
    }

    let base_dir = source_part.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("");
    normalize(&format!("{base_dir}/{target}"))
}

fn normalize(path: &str) -> String {
    let mut out: Vec<&str> = Vec::new();
    for part in path.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rels_for_worksheet_part() {
        assert_eq!(
            rels_for_part("xl/worksheets/sheet3.xml"),
            "xl/worksheets/_rels/sheet3.xml.rels"
        );
        assert_eq!(rels_for_part("workbook.xml"), "_rels/workbook.xml.rels");
    }

    #[test]
    fn drawing_target_resolves_next_to_worksheets() {
        assert_eq!(
            resolve_target("xl/worksheets/sheet1.xml", "../drawings/drawing2.xml"),
            "xl/drawings/drawing2.xml"
        );
    }

    #[test]
    fn absolute_and_fragment_targets() {
        assert_eq!(
            resolve_target("xl/worksheets/sheet1.xml", "/xl/./drawings/drawing1.xml#obj"),
            "xl/drawings/drawing1.xml"
        );
        assert_eq!(
            resolve_target("xl/worksheets/sheet1.xml", "#rId1"),
            "xl/worksheets/sheet1.xml"
        );
    }
}
