// data module
pub mod data {
    pub mod diagram;
    pub mod betti;
    pub mod table;
    pub mod point_cloud;
}

// algorithm module
pub mod algorithm {
    pub mod diagram_features;
    pub mod betti_features;
    pub mod attach;
}
