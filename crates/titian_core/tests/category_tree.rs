use titian_core::{CategoryId, FieldId, NamePolicy, Taxonomy, TaxonomyError};

fn field_names(taxonomy: &Taxonomy, category: CategoryId) -> Vec<String> {
    taxonomy
        .fields(category)
        .unwrap()
        .iter()
        .map(|field| field.name().to_string())
        .collect()
}

fn subcategory_names(taxonomy: &Taxonomy, category: CategoryId) -> Vec<String> {
    taxonomy
        .subcategories(category)
        .unwrap()
        .iter()
        .map(|child| child.name().to_string())
        .collect()
}

fn with_fields(taxonomy: &mut Taxonomy, category: CategoryId, names: &[&str]) -> Vec<FieldId> {
    names
        .iter()
        .map(|name| {
            let id = taxonomy.create_field(*name, "").unwrap();
            taxonomy.append_field(category, id).unwrap();
            id
        })
        .collect()
}

fn with_subcategories(
    taxonomy: &mut Taxonomy,
    parent: CategoryId,
    names: &[&str],
) -> Vec<CategoryId> {
    names
        .iter()
        .map(|name| {
            let id = taxonomy.create_category(*name, "").unwrap();
            taxonomy.append_subcategory(parent, id).unwrap();
            id
        })
        .collect()
}

fn assert_namespace_unique(taxonomy: &Taxonomy, category: CategoryId) {
    let mut names = field_names(taxonomy, category);
    names.extend(subcategory_names(taxonomy, category));
    let total = names.len();
    names.sort();
    names.dedup();
    assert_eq!(names.len(), total, "duplicate names under {category}");
}

#[test]
fn create_category_starts_detached_and_empty() {
    let mut taxonomy = Taxonomy::new();
    let root = taxonomy.create_category("Contact", "All contact data").unwrap();

    let category = taxonomy.category(root).unwrap();
    assert_eq!(category.name(), "Contact");
    assert_eq!(category.description(), "All contact data");
    assert!(category.fields().is_empty());
    assert!(category.subcategories().is_empty());
    assert_eq!(taxonomy.parent_of(root), None);
    assert_eq!(taxonomy.roots(), vec![root]);
}

#[test]
fn append_keeps_insertion_order() {
    let mut taxonomy = Taxonomy::new();
    let root = taxonomy.create_category("Root", "").unwrap();
    with_fields(&mut taxonomy, root, &["Phone", "Fax", "Pager"]);
    with_subcategories(&mut taxonomy, root, &["Work", "Home"]);

    assert_eq!(field_names(&taxonomy, root), ["Phone", "Fax", "Pager"]);
    assert_eq!(subcategory_names(&taxonomy, root), ["Work", "Home"]);
}

#[test]
fn append_field_rejects_duplicate_field_name() {
    let mut taxonomy = Taxonomy::new();
    let root = taxonomy.create_category("Root", "").unwrap();
    with_fields(&mut taxonomy, root, &["A"]);

    let other = taxonomy.create_field("A", "").unwrap();
    let err = taxonomy.append_field(root, other).unwrap_err();
    assert_eq!(err, TaxonomyError::DuplicateName("A".to_string()));
    assert_eq!(field_names(&taxonomy, root), ["A"]);
    assert_eq!(taxonomy.owner_of(other), None);
}

#[test]
fn append_field_rejects_subcategory_name() {
    let mut taxonomy = Taxonomy::new();
    let root = taxonomy.create_category("Root", "").unwrap();
    with_subcategories(&mut taxonomy, root, &["A"]);

    let field = taxonomy.create_field("A", "").unwrap();
    let err = taxonomy.append_field(root, field).unwrap_err();
    assert_eq!(err, TaxonomyError::NameCollidesWithSubcategory("A".to_string()));
    assert!(field_names(&taxonomy, root).is_empty());
}

#[test]
fn append_subcategory_rejects_duplicate_and_field_names() {
    let mut taxonomy = Taxonomy::new();
    let root = taxonomy.create_category("Root", "").unwrap();
    with_subcategories(&mut taxonomy, root, &["Work"]);
    with_fields(&mut taxonomy, root, &["Phone"]);

    let work_again = taxonomy.create_category("Work", "").unwrap();
    let err = taxonomy.append_subcategory(root, work_again).unwrap_err();
    assert_eq!(err, TaxonomyError::DuplicateName("Work".to_string()));

    let phone_category = taxonomy.create_category("Phone", "").unwrap();
    let err = taxonomy.append_subcategory(root, phone_category).unwrap_err();
    assert_eq!(err, TaxonomyError::NameCollidesWithField("Phone".to_string()));

    assert_eq!(subcategory_names(&taxonomy, root), ["Work"]);
    assert_eq!(taxonomy.parent_of(work_again), None);
}

#[test]
fn same_name_is_allowed_at_different_levels() {
    let mut taxonomy = Taxonomy::new();
    let root = taxonomy.create_category("Root", "").unwrap();
    let children = with_subcategories(&mut taxonomy, root, &["Work", "Home"]);
    with_fields(&mut taxonomy, children[0], &["Phone"]);
    with_fields(&mut taxonomy, children[1], &["Phone"]);
    with_subcategories(&mut taxonomy, children[1], &["Work"]);

    assert_eq!(field_names(&taxonomy, children[0]), ["Phone"]);
    assert_eq!(field_names(&taxonomy, children[1]), ["Phone"]);
    assert_eq!(subcategory_names(&taxonomy, children[1]), ["Work"]);
}

#[test]
fn field_can_only_have_one_owner() {
    let mut taxonomy = Taxonomy::new();
    let first = taxonomy.create_category("First", "").unwrap();
    let second = taxonomy.create_category("Second", "").unwrap();
    let field = taxonomy.create_field("Phone", "").unwrap();
    taxonomy.append_field(first, field).unwrap();

    let err = taxonomy.append_field(second, field).unwrap_err();
    assert_eq!(
        err,
        TaxonomyError::FieldAlreadyAttached {
            field,
            owner: first
        }
    );

    taxonomy.remove_field(first, field).unwrap();
    taxonomy.append_field(second, field).unwrap();
    assert_eq!(taxonomy.owner_of(field), Some(second));
}

#[test]
fn append_subcategory_rejects_reparenting_and_cycles() {
    let mut taxonomy = Taxonomy::new();
    let a = taxonomy.create_category("A", "").unwrap();
    let b = taxonomy.create_category("B", "").unwrap();
    let c = taxonomy.create_category("C", "").unwrap();
    taxonomy.append_subcategory(a, b).unwrap();
    taxonomy.append_subcategory(b, c).unwrap();

    let assert_unchanged = |taxonomy: &Taxonomy| {
        assert_eq!(subcategory_names(taxonomy, a), ["B"]);
        assert_eq!(subcategory_names(taxonomy, b), ["C"]);
        assert!(subcategory_names(taxonomy, c).is_empty());
        assert_eq!(taxonomy.parent_of(a), None);
        assert_eq!(taxonomy.parent_of(b), Some(a));
        assert_eq!(taxonomy.parent_of(c), Some(b));
    };

    let err = taxonomy.append_subcategory(c, a).unwrap_err();
    assert_eq!(err, TaxonomyError::CycleDetected { category: a, parent: c });
    assert_unchanged(&taxonomy);

    let err = taxonomy.append_subcategory(a, a).unwrap_err();
    assert_eq!(err, TaxonomyError::CycleDetected { category: a, parent: a });
    assert_unchanged(&taxonomy);

    let err = taxonomy.append_subcategory(a, c).unwrap_err();
    assert_eq!(
        err,
        TaxonomyError::CategoryAlreadyAttached {
            category: c,
            parent: b
        }
    );
    assert_unchanged(&taxonomy);
}

#[test]
fn move_field_uses_remove_then_insert_semantics() {
    let mut taxonomy = Taxonomy::new();
    let root = taxonomy.create_category("Root", "").unwrap();
    let ids = with_fields(&mut taxonomy, root, &["X", "Y", "Z"]);

    taxonomy.move_field(root, 0, 2).unwrap();
    assert_eq!(field_names(&taxonomy, root), ["Y", "Z", "X"]);

    let mut after: Vec<FieldId> = taxonomy.category(root).unwrap().fields().to_vec();
    let mut before = ids;
    after.sort();
    before.sort();
    assert_eq!(after, before);
}

#[test]
fn move_subcategory_reorders_toward_front() {
    let mut taxonomy = Taxonomy::new();
    let root = taxonomy.create_category("Root", "").unwrap();
    with_subcategories(&mut taxonomy, root, &["Alpha", "Beta", "Gamma"]);

    taxonomy.move_subcategory(root, 2, 0).unwrap();
    assert_eq!(subcategory_names(&taxonomy, root), ["Gamma", "Alpha", "Beta"]);
}

#[test]
fn move_rejects_out_of_range_indices_without_clamping() {
    let mut taxonomy = Taxonomy::new();
    let root = taxonomy.create_category("Root", "").unwrap();
    with_fields(&mut taxonomy, root, &["X", "Y"]);

    let err = taxonomy.move_field(root, 2, 0).unwrap_err();
    assert_eq!(err, TaxonomyError::IndexOutOfRange { index: 2, len: 2 });
    assert!(err.is_precondition_violation());

    let err = taxonomy.move_subcategory(root, 0, 0).unwrap_err();
    assert_eq!(err, TaxonomyError::IndexOutOfRange { index: 0, len: 0 });
    assert_eq!(field_names(&taxonomy, root), ["X", "Y"]);
}

#[test]
fn rename_field_preserves_position() {
    let mut taxonomy = Taxonomy::new();
    let root = taxonomy.create_category("Root", "").unwrap();
    let ids = with_fields(&mut taxonomy, root, &["A", "B", "C"]);

    taxonomy.rename_field(root, "B", "D").unwrap();
    assert_eq!(field_names(&taxonomy, root), ["A", "D", "C"]);
    assert_eq!(taxonomy.category(root).unwrap().fields()[1], ids[1]);
    assert!(taxonomy.get_field(root, "B").unwrap().is_none());
    assert_eq!(taxonomy.get_field(root, "D").unwrap().unwrap().id(), ids[1]);
}

#[test]
fn rename_field_rejects_taken_names() {
    let mut taxonomy = Taxonomy::new();
    let root = taxonomy.create_category("Root", "").unwrap();
    with_fields(&mut taxonomy, root, &["A", "B"]);
    with_subcategories(&mut taxonomy, root, &["Work"]);

    let err = taxonomy.rename_field(root, "A", "B").unwrap_err();
    assert_eq!(err, TaxonomyError::DuplicateName("B".to_string()));

    let err = taxonomy.rename_field(root, "A", "Work").unwrap_err();
    assert_eq!(err, TaxonomyError::NameCollidesWithSubcategory("Work".to_string()));

    assert_eq!(field_names(&taxonomy, root), ["A", "B"]);
    assert_namespace_unique(&taxonomy, root);
}

#[test]
fn rename_subcategory_onto_field_name_leaves_both_unchanged() {
    let mut taxonomy = Taxonomy::new();
    let root = taxonomy.create_category("Root", "").unwrap();
    with_fields(&mut taxonomy, root, &["Phone"]);
    with_subcategories(&mut taxonomy, root, &["Work"]);

    let err = taxonomy.rename_subcategory(root, "Work", "Phone").unwrap_err();
    assert_eq!(err, TaxonomyError::NameCollidesWithField("Phone".to_string()));
    assert_eq!(field_names(&taxonomy, root), ["Phone"]);
    assert_eq!(subcategory_names(&taxonomy, root), ["Work"]);
}

#[test]
fn rename_unknown_name_is_a_precondition_violation() {
    let mut taxonomy = Taxonomy::new();
    let root = taxonomy.create_category("Root", "").unwrap();
    with_fields(&mut taxonomy, root, &["A"]);

    let err = taxonomy.rename_field(root, "Missing", "B").unwrap_err();
    assert_eq!(err, TaxonomyError::FieldNotFound("Missing".to_string()));
    assert!(err.is_precondition_violation());

    let err = taxonomy.rename_subcategory(root, "Missing", "B").unwrap_err();
    assert_eq!(err, TaxonomyError::SubcategoryNotFound("Missing".to_string()));
}

#[test]
fn rename_subcategory_succeeds_and_keeps_identity() {
    let mut taxonomy = Taxonomy::new();
    let root = taxonomy.create_category("Root", "").unwrap();
    let ids = with_subcategories(&mut taxonomy, root, &["Work", "Home"]);

    taxonomy.rename_subcategory(root, "Work", "Office").unwrap();
    assert_eq!(subcategory_names(&taxonomy, root), ["Office", "Home"]);
    assert_eq!(
        taxonomy.get_subcategory(root, "Office").unwrap().unwrap().id(),
        ids[0]
    );
}

#[test]
fn remove_is_silent_for_non_members() {
    let mut taxonomy = Taxonomy::new();
    let root = taxonomy.create_category("Root", "").unwrap();
    let other = taxonomy.create_category("Other", "").unwrap();
    with_fields(&mut taxonomy, root, &["A", "B"]);
    let foreign = with_fields(&mut taxonomy, other, &["C"]);
    let stray = taxonomy.create_category("Stray", "").unwrap();

    taxonomy.remove_field(root, foreign[0]).unwrap();
    taxonomy.remove_subcategory(root, stray).unwrap();

    assert_eq!(field_names(&taxonomy, root), ["A", "B"]);
    assert_eq!(taxonomy.owner_of(foreign[0]), Some(other));
}

#[test]
fn remove_subcategory_detaches_but_keeps_subtree() {
    let mut taxonomy = Taxonomy::new();
    let root = taxonomy.create_category("Root", "").unwrap();
    let work = with_subcategories(&mut taxonomy, root, &["Work"])[0];
    let title = with_fields(&mut taxonomy, work, &["Title"])[0];

    taxonomy.remove_subcategory(root, work).unwrap();

    assert!(subcategory_names(&taxonomy, root).is_empty());
    assert_eq!(taxonomy.parent_of(work), None);
    assert_eq!(taxonomy.owner_of(title), Some(work));
    assert!(taxonomy.roots().contains(&work));
}

#[test]
fn operations_on_unknown_ids_report_not_found() {
    let mut taxonomy = Taxonomy::new();
    let root = taxonomy.create_category("Root", "").unwrap();
    let missing = uuid::Uuid::new_v4();

    assert_eq!(
        taxonomy.append_field(root, missing).unwrap_err(),
        TaxonomyError::UnknownField(missing)
    );
    assert_eq!(
        taxonomy.fields(missing).unwrap_err(),
        TaxonomyError::CategoryNotFound(missing)
    );
    assert_eq!(
        taxonomy.remove_field(missing, missing).unwrap_err(),
        TaxonomyError::CategoryNotFound(missing)
    );
}

#[test]
fn descriptions_are_freely_mutable() {
    let mut taxonomy = Taxonomy::new();
    let root = taxonomy.create_category("Root", "old").unwrap();
    let field = taxonomy.create_field("Phone", "old").unwrap();

    taxonomy.set_category_description(root, "new root").unwrap();
    taxonomy.set_field_description(field, "new field").unwrap();

    assert_eq!(taxonomy.category(root).unwrap().description(), "new root");
    assert_eq!(taxonomy.field(field).unwrap().description(), "new field");
}

#[test]
fn reject_blank_policy_applies_to_create_and_rename() {
    let mut taxonomy = Taxonomy::with_name_policy(NamePolicy::RejectBlank);
    assert_eq!(
        taxonomy.create_category("  ", "").unwrap_err(),
        TaxonomyError::InvalidName("  ".to_string())
    );

    let root = taxonomy.create_category(" Root ", "").unwrap();
    assert_eq!(taxonomy.category(root).unwrap().name(), "Root");
    with_fields(&mut taxonomy, root, &["A"]);

    let err = taxonomy.rename_field(root, "A", "").unwrap_err();
    assert_eq!(err, TaxonomyError::InvalidName(String::new()));
    assert_eq!(field_names(&taxonomy, root), ["A"]);
}

#[test]
fn permissive_policy_accepts_empty_names() {
    let mut taxonomy = Taxonomy::new();
    let root = taxonomy.create_category("", "").unwrap();
    with_fields(&mut taxonomy, root, &[""]);

    let blank = taxonomy.create_category("", "").unwrap();
    let err = taxonomy.append_subcategory(root, blank).unwrap_err();
    assert_eq!(err, TaxonomyError::NameCollidesWithField(String::new()));
}

#[test]
fn delete_category_subtree_purges_records_and_reports_fields() {
    let mut taxonomy = Taxonomy::new();
    let root = taxonomy.create_category("Root", "").unwrap();
    let kept = with_fields(&mut taxonomy, root, &["Name"]);
    let work = with_subcategories(&mut taxonomy, root, &["Work"])[0];
    let mut purged = with_fields(&mut taxonomy, work, &["Title", "Desk"]);
    let team = with_subcategories(&mut taxonomy, work, &["Team"])[0];
    purged.extend(with_fields(&mut taxonomy, team, &["Lead"]));

    let mut reported = taxonomy.delete_category_subtree(work).unwrap();
    reported.sort();
    purged.sort();
    assert_eq!(reported, purged);

    assert!(taxonomy.category(work).is_none());
    assert!(taxonomy.category(team).is_none());
    assert!(subcategory_names(&taxonomy, root).is_empty());
    assert_eq!(taxonomy.category_count(), 1);
    assert_eq!(taxonomy.field_count(), 1);
    assert_eq!(taxonomy.owner_of(kept[0]), Some(root));
}

#[test]
fn delete_field_detaches_from_owner() {
    let mut taxonomy = Taxonomy::new();
    let root = taxonomy.create_category("Root", "").unwrap();
    let ids = with_fields(&mut taxonomy, root, &["A", "B"]);

    let record = taxonomy.delete_field(ids[0]).unwrap();
    assert_eq!(record.name(), "A");
    assert_eq!(field_names(&taxonomy, root), ["B"]);
    assert!(taxonomy.field(ids[0]).is_none());
    assert_eq!(
        taxonomy.delete_field(ids[0]).unwrap_err(),
        TaxonomyError::UnknownField(ids[0])
    );
}

#[test]
fn mixed_mutation_sequence_keeps_namespace_unique() {
    let mut taxonomy = Taxonomy::new();
    let root = taxonomy.create_category("Root", "").unwrap();
    let names = ["A", "B", "C", "A", "B", "D"];

    for (index, name) in names.iter().enumerate() {
        if index % 2 == 0 {
            let field = taxonomy.create_field(*name, "").unwrap();
            let _ = taxonomy.append_field(root, field);
        } else {
            let child = taxonomy.create_category(*name, "").unwrap();
            let _ = taxonomy.append_subcategory(root, child);
        }
        assert_namespace_unique(&taxonomy, root);
    }

    let _ = taxonomy.rename_field(root, "A", "B");
    let _ = taxonomy.rename_subcategory(root, "B", "C");
    let _ = taxonomy.rename_subcategory(root, "D", "E");
    assert_namespace_unique(&taxonomy, root);
    assert_eq!(field_names(&taxonomy, root), ["A", "C"]);
    assert_eq!(subcategory_names(&taxonomy, root), ["B", "E"]);
}
