pub mod knn;
pub mod vote;
pub mod weighted;

pub use knn::KnnClassifier;
pub use weighted::WeightedKnnClassifier;
