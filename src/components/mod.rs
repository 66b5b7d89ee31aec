pub mod force_graph;
pub mod ring_table;
pub mod toolbar;
