pub mod composite;
pub mod edit_distance;
pub mod narration;
pub mod overlap;
pub mod report;
pub mod similarity;
pub mod tokenization;
