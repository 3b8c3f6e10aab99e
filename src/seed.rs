use crate::auction::Item;

/// Items the demo catalog starts with
pub fn demo_items() -> Vec<Item> {
    vec![
        Item::new("Painting", "Art"),
        Item::new("Sculpture", "Art").with_floor(50.0),
        Item::new("Vase", "Antique").with_floor(20.0),
        Item::new("Pocket Watch", "Antique"),
        Item::new("Guitar", "Music").with_floor(100.0),
        Item::new("Vinyl Collection", "Music"),
    ]
}
