use jdiff_rs::filter::{filter_differences, PathFilter};
use jdiff_rs::{Difference, Node};

fn added(path: &str) -> Difference {
    Difference::Added {
        path: path.to_string(),
        value: Node::Bool(true),
    }
}

#[test]
fn test_default_filter_is_inactive() {
    let filter = PathFilter::default();
    assert!(!filter.is_active());
    assert!(filter.should_include("anything"));
}

#[test]
fn test_exclude_substring() {
    let filter = PathFilter::new(&[], &["internal".to_string()]);
    assert!(filter.is_active());
    assert!(!filter.should_include("1.internal.flag"));
    assert!(filter.should_include("1.public.flag"));
}

#[test]
fn test_include_substring() {
    let filter = PathFilter::new(&["spec".to_string()], &[]);
    assert!(filter.should_include("cfg.spec.replicas"));
    assert!(!filter.should_include("cfg.status.phase"));
}

#[test]
fn test_include_wins_over_exclude() {
    let filter = PathFilter::new(&["spec".to_string()], &["spec".to_string()]);
    assert!(filter.should_include("cfg.spec.replicas"));
    assert!(!filter.should_include("cfg.metadata.name"));
}

#[test]
fn test_wildcard_tokens_are_stripped_not_interpreted() {
    let filter = PathFilter::new(&[], &["users[].*name$".to_string()]);
    // Stripped down to "users.name" and matched as a plain substring
    assert!(!filter.should_include("1.users.name"));
    assert!(filter.should_include("1.users.email"));
}

#[test]
fn test_filter_differences_keeps_matching_paths() {
    let differences = vec![added("a.keep"), added("a.drop.x"), added("b.keep")];
    let filter = PathFilter::new(&["keep".to_string()], &[]);
    let kept = filter_differences(differences, &filter);
    assert_eq!(kept.len(), 2);
    assert!(kept.iter().all(|d| d.path().contains("keep")));
}

#[test]
fn test_inactive_filter_passes_everything_through() {
    let differences = vec![added("a"), added("b")];
    let kept = filter_differences(differences.clone(), &PathFilter::default());
    assert_eq!(kept, differences);
}
