use crate::error::{FatGraphError, Result};
use crate::generate::{count_and_weight, counts_table, Enumeration};
use crate::permutable::{Canonizable, FHashSet};
use clap::Parser;
use rayon::ThreadPoolBuilder;
use std::io::{stdout, Write};
use timeit::timeit_loops;
use tracing::info;

macro_rules! print_flush {
    ( $($t:tt)* ) => {
        {
            print!($($t)*);
            stdout().flush().map_err(|e| FatGraphError::Io(e.to_string()))?;
        }
    }
}

#[derive(Clone, Debug, Parser, PartialEq)]
pub struct Config {
    /// Genus of the enumerated fat graphs.
    pub genus: usize,
    /// Number of faces.
    pub faces: usize,
    /// Number of vertices.
    pub vertices: usize,

    /// Only create vertices of at least this degree when splitting vertices.
    #[arg(long, default_value_t = 1)]
    pub min_degree: usize,
    /// Also report fat graphs with fewer faces and/or vertices.
    #[arg(short, long)]
    pub intermediate: bool,
    /// Report counts for every number of faces and vertices up to the given ones, each
    /// enumerated separately in parallel.
    #[arg(long)]
    pub table: bool,
    /// Print every fat graph with the order of its automorphism group.
    #[arg(short, long)]
    pub list: bool,
    /// Verify the invariants of every fat graph and that no two are isomorphic.
    #[arg(long)]
    pub check: bool,

    #[arg(short, long)]
    /// Number of threads to use for parallelism. By default, the number of logical CPUs is used.
    pub threads: Option<usize>,
}

impl Config {
    pub fn enumeration(&self) -> Enumeration {
        Enumeration::new(self.genus, self.faces, self.vertices)
            .vertex_min_degree(self.min_degree)
            .intermediate(self.intermediate)
    }
}

pub struct Benchmark {
    pub config: Config,
}

impl Benchmark {
    pub fn timed_run(&self) -> Result<()> {
        let mut result = Ok(());
        let time = timeit_loops!(1, { result = self.run(); });
        result?;
        println!("Finished in {time:.1}s.");
        Ok(())
    }

    pub fn run(&self) -> Result<()> {
        if let Some(threads) = self.config.threads {
            ThreadPoolBuilder::new().num_threads(threads).build_global()
                .map_err(|e| FatGraphError::InvalidParameters(e.to_string()))?;
        }
        if self.config.table {
            return self.run_table();
        }
        let e = self.config.enumeration();
        let graphs = e.iter()?;
        info!(genus = e.genus, faces = e.num_faces, vertices = e.num_vertices, edges = e.num_edges(), "enumerating");
        println!("genus faces vertices count weight");
        if !self.config.list && !self.config.check && !self.config.intermediate {
            let (count, weight) = count_and_weight(graphs)?;
            println!("{} {} {} {count} {weight}", e.genus, e.num_faces, e.num_vertices);
            return Ok(());
        }

        let mut seen = FHashSet::default();
        let mut per_size = vec![vec![vec![]; e.num_vertices + 1]; e.num_faces + 1];
        for item in graphs {
            let (g, aut) = item?;
            if self.config.check {
                g.check()?;
                let c = g.canonized();
                let key = (c.vertex_permutation().to_vec(), c.face_permutation().to_vec());
                if !seen.insert(key) {
                    return Err(FatGraphError::Duplicate(g.to_string()));
                }
            }
            if self.config.list {
                print_flush!("{g}\n |Aut| = {}\n", aut.cardinality());
            }
            per_size[g.num_faces()][g.num_vertices()].push(Ok((g, aut)));
        }
        for (faces, row) in per_size.into_iter().enumerate().rev() {
            for (vertices, graphs) in row.into_iter().enumerate().rev() {
                if graphs.is_empty() {
                    continue;
                }
                let (count, weight) = count_and_weight(graphs)?;
                println!("{} {faces} {vertices} {count} {weight}", e.genus);
            }
        }
        Ok(())
    }

    fn run_table(&self) -> Result<()> {
        let Config { genus, faces, vertices, min_degree, .. } = self.config;
        info!(genus, faces, vertices, min_degree, "counting table");
        println!("genus faces vertices count weight");
        for ((f, v), (count, weight)) in counts_table(genus, faces, vertices, min_degree)? {
            print_flush!("{genus} {f} {v} {count} {weight}\n");
        }
        Ok(())
    }
}
