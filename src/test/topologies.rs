use crate::topo::{DIAMOND_PATHS, PathSet, diamond_paths};

#[test]
fn diamond_has_two_paths_over_six_links() {
    let paths = diamond_paths();
    assert_eq!(paths.len(), 2);
    assert_eq!(paths.n_links(), 6);
    assert_eq!(paths.path(0), &DIAMOND_PATHS[0]);
    assert_eq!(paths.links_on(0).collect::<Vec<_>>(), vec![0, 1, 3, 5]);
    assert_eq!(paths.links_on(1).collect::<Vec<_>>(), vec![0, 2, 4]);
}

#[test]
fn every_diamond_link_is_used_by_some_path() {
    let paths = diamond_paths();
    for link in 0..paths.n_links() {
        assert!(
            (0..paths.len()).any(|p| paths.path(p)[link] == 1),
            "link {link} is unused"
        );
    }
}

#[test]
fn path_set_validation() {
    assert!(PathSet::new(vec![]).is_err());
    assert!(PathSet::new(vec![vec![]]).is_err());
    assert!(PathSet::new(vec![vec![1, 0], vec![1, 1, 0]]).is_err());
    assert!(PathSet::new(vec![vec![1, 2]]).is_err());
    assert!(PathSet::new(vec![vec![0, 0]]).is_err());
    assert!(PathSet::new(vec![vec![1, 0], vec![0, 1]]).is_ok());
}

#[test]
fn path_set_serializes_as_plain_bit_vectors() {
    let paths = PathSet::new(vec![vec![1, 0, 1]]).expect("valid path set");
    let raw = serde_json::to_string(&paths).expect("serialize");
    assert_eq!(raw, "[[1,0,1]]");
    let back: PathSet = serde_json::from_str(&raw).expect("deserialize");
    assert_eq!(back, paths);
}
