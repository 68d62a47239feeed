use crate::domain::validation::{allowed_categories, allowed_priorities};

pub fn run() {
    println!("Categories: {}", allowed_categories());
    println!("Priorities: {}", allowed_priorities());
}
