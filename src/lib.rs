//! Fat graphs (combinatorial maps): exactly invertible mutations, canonical labellings with
//! automorphism groups, and isomorphism-free enumeration by genus, faces and vertices.
pub mod error;
pub mod permutable;
pub mod group;
pub mod fat_graph;
pub mod generate;

pub use error::*;
pub use permutable::*;
pub use fat_graph::{Dart, FatGraph};
pub use group::orbit::PermutationGroupOrbit;
pub use group::PermutationGroup;
pub use generate::{count_and_weight, counts_table, fat_graphs, Enumeration, FatGraphs};

#[cfg(any(test, feature = "bench"))]
pub mod bench;
