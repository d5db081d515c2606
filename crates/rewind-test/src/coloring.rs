//! Graph coloring search fixtures.

use rewind_search::SearchContext;

/// An undirected graph over vertices `0..vertex_count`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    pub vertex_count: usize,
    pub edges: Vec<(usize, usize)>,
}

impl Graph {
    /// Creates a graph from its edge list.
    pub fn new(vertex_count: usize, edges: Vec<(usize, usize)>) -> Self {
        Self {
            vertex_count,
            edges,
        }
    }

    /// A cycle through every vertex.
    pub fn cycle(vertex_count: usize) -> Self {
        let edges = (0..vertex_count)
            .map(|v| (v, (v + 1) % vertex_count))
            .collect();
        Self::new(vertex_count, edges)
    }

    /// A graph where every pair of vertices is adjacent.
    pub fn complete(vertex_count: usize) -> Self {
        let edges = (0..vertex_count)
            .flat_map(|a| (a + 1..vertex_count).map(move |b| (a, b)))
            .collect();
        Self::new(vertex_count, edges)
    }

    /// Returns true if no edge joins two vertices of the same color.
    pub fn is_proper(&self, colors: &[usize]) -> bool {
        self.edges.iter().all(|&(a, b)| colors[a] != colors[b])
    }

    /// Returns true if `color` does not clash with an already colored
    /// neighbour of the next vertex.
    fn accepts(&self, colors: &[usize], color: usize) -> bool {
        let vertex = colors.len();
        self.edges.iter().all(|&(a, b)| {
            let other = if a == vertex {
                b
            } else if b == vertex {
                a
            } else {
                return true;
            };
            other >= vertex || colors[other] != color
        })
    }
}

/// Returns a search body assigning one of `color_count` colors to every
/// vertex so that adjacent vertices differ.
pub fn coloring_body(
    graph: Graph,
    color_count: usize,
) -> impl Fn(&mut SearchContext<Vec<usize>>) -> Vec<usize> + Send + Sync + 'static {
    move |ctx| {
        let mut colors = Vec::with_capacity(graph.vertex_count);
        for _ in 0..graph.vertex_count {
            let color = ctx.choose_index(color_count);
            ctx.require(graph.accepts(&colors, color));
            colors.push(color);
        }
        colors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_shapes() {
        assert_eq!(Graph::cycle(4).edges, vec![(0, 1), (1, 2), (2, 3), (3, 0)]);
        assert_eq!(Graph::complete(3).edges, vec![(0, 1), (0, 2), (1, 2)]);
    }

    #[test]
    fn test_is_proper() {
        let square = Graph::cycle(4);
        assert!(square.is_proper(&[0, 1, 0, 1]));
        assert!(!square.is_proper(&[0, 0, 1, 1]));
    }
}
