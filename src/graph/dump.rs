//! Human-readable dumps of the graph for debugging and inspection

use super::store::GraphStore;

impl GraphStore {
    /// Adjacency list, one `code: n1 n2 ...` line per node
    pub fn adjacency_dump(&self) -> String {
        let mut out = String::from("Adjacency List of G:\n====================\n");
        for (id, neighbors) in self.adjacency() {
            let codes: Vec<String> = neighbors.iter().map(|n| n.to_string()).collect();
            out.push_str(&format!("{}: {}\n", id, codes.join(" ")));
        }
        out
    }

    /// Degree of every node
    pub fn degree_table(&self) -> String {
        let mut out = String::from("Degrees in G:\n=============\n");
        for (id, neighbors) in self.adjacency() {
            out.push_str(&format!("Degree({}): {}\n", id, neighbors.len()));
        }
        out
    }

    /// Degree distribution as `degree count` lines, ascending by degree
    pub fn distribution_dump(&self) -> String {
        self.degree_distribution()
            .iter()
            .map(|(degree, count)| format!("{} {}\n", degree, count))
            .collect()
    }

    /// Statistics block for step `t`
    pub fn statistics_dump(&self, t: usize) -> String {
        format!(
            "Statistics of G at t = {}:\n{}\nNumber of Nodes: {}\nNumber of Edges: {}\nAverage Degree of G: {:?}\n",
            t,
            "=".repeat(30),
            self.node_count(),
            self.edge_count(),
            self.average_degree()
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::{GraphStore, NodeId};

    fn sample() -> GraphStore {
        let mut store = GraphStore::seeded();
        store.add_node(NodeId(1), NodeId(2)).unwrap();
        store.add_node(NodeId(2), NodeId(3)).unwrap();
        store
    }

    #[test]
    fn test_adjacency_dump() {
        let dump = sample().adjacency_dump();
        let lines: Vec<&str> = dump.lines().collect();
        assert_eq!(lines[0], "Adjacency List of G:");
        assert_eq!(&lines[2..], &["1: 1 2", "2: 1 3", "3: 2"]);
    }

    #[test]
    fn test_degree_table() {
        let dump = sample().degree_table();
        assert!(dump.contains("Degree(1): 2\n"));
        assert!(dump.contains("Degree(2): 2\n"));
        assert!(dump.contains("Degree(3): 1\n"));
    }

    #[test]
    fn test_distribution_dump() {
        assert_eq!(sample().distribution_dump(), "1 1\n2 2\n");
    }

    #[test]
    fn test_statistics_dump() {
        let dump = GraphStore::seeded().statistics_dump(1);
        assert!(dump.starts_with("Statistics of G at t = 1:\n==============================\n"));
        assert!(dump.contains("Number of Nodes: 1\n"));
        assert!(dump.contains("Number of Edges: 1\n"));
        assert!(dump.contains("Average Degree of G: 1.0\n"));

        let wide = GraphStore::seeded().statistics_dump(100_000);
        assert_eq!(wide.lines().nth(1), Some("=".repeat(30).as_str()));
    }
}
