pub mod node_crud;
