use avl_dict::{RebalanceRule, Tree};

fn main() {
    let mut tree = Tree::new();
    tree.insert("zero");
    tree.insert("one");
    tree.insert("two");
    assert!(!tree.insert("two"));
    tree.insert("three");
    tree.insert("four");
    tree.insert("five");
    assert_eq!(tree.find(&"one"), Some(&"one"));
    tree.remove(&"one");
    assert!(tree.find(&"one").is_none());
    println!("{} keys, height {}", tree.len(), tree.height());

    let mut left_probe = Tree::with_rule(RebalanceRule::LeftProbe);
    for x in [1, 3, 2] {
        left_probe.insert(x);
    }
    match left_probe.check_consistency() {
        Ok(()) => println!("left probe tree is consistent"),
        Err(err) => println!("left probe tree: {err}"),
    }
}
