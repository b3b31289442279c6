//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `titian_core` linkage without any application shell.
//! - Print a deterministic sample taxonomy outline.

use titian_core::{CategoryId, Taxonomy, TaxonomyResult};

fn main() {
    println!("titian_core ping={}", titian_core::ping());
    println!("titian_core version={}", titian_core::core_version());

    match sample_outline() {
        Ok(lines) => lines.iter().for_each(|line| println!("{line}")),
        Err(err) => {
            eprintln!("sample taxonomy failed: {err}");
            std::process::exit(1);
        }
    }
}

fn sample_outline() -> TaxonomyResult<Vec<String>> {
    let mut taxonomy = Taxonomy::new();
    let root = taxonomy.create_category("Contact", "")?;
    let work = taxonomy.create_category("Work", "")?;
    let phone = taxonomy.create_field("Phone Number", "")?;
    let title = taxonomy.create_field("Job Title", "")?;
    taxonomy.append_field(root, phone)?;
    taxonomy.append_subcategory(root, work)?;
    taxonomy.append_field(work, title)?;

    let mut lines = Vec::new();
    for id in taxonomy.category_ids(root)? {
        let depth = depth_of(&taxonomy, id);
        if let Some(category) = taxonomy.category(id) {
            lines.push(format!("{}[{}]", "  ".repeat(depth), category.name()));
        }
        for field in taxonomy.fields(id)? {
            lines.push(format!("{}- {}", "  ".repeat(depth + 1), field.name()));
        }
    }
    Ok(lines)
}

fn depth_of(taxonomy: &Taxonomy, id: CategoryId) -> usize {
    let mut depth = 0;
    let mut cursor = taxonomy.parent_of(id);
    while let Some(parent) = cursor {
        depth += 1;
        cursor = taxonomy.parent_of(parent);
    }
    depth
}
