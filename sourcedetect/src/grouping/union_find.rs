/// Disjoint-set forest over dense `usize` node indices with union by rank.
#[derive(Debug, Default, Clone)]
pub(crate) struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl UnionFind {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forest of `len` singleton sets.
    pub fn with_len(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
            rank: vec![0; len],
        }
    }

    #[inline]
    pub fn make_set(&mut self) -> usize {
        let node = self.parent.len();
        self.parent.push(node);
        self.rank.push(0);
        node
    }

    /// Find root with iterative path compression (two-pass).
    pub fn find(&mut self, node: usize) -> usize {
        let mut root = node;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        let mut current = node;
        while current != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }

        root
    }

    /// Merge the sets of `a` and `b`. On equal rank `a`'s root wins.
    ///
    /// Returns `false` when both were already in the same set.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b {
            return false;
        }

        match self.rank[root_a].cmp(&self.rank[root_b]) {
            std::cmp::Ordering::Greater => self.parent[root_b] = root_a,
            std::cmp::Ordering::Less => self.parent[root_a] = root_b,
            std::cmp::Ordering::Equal => {
                self.parent[root_b] = root_a;
                self.rank[root_a] += 1;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_singletons_are_their_own_roots() {
        let mut uf = UnionFind::with_len(3);
        for node in 0..3 {
            assert_eq!(uf.find(node), node);
        }
    }

    #[test]
    fn test_union_merges_transitively() {
        let mut uf = UnionFind::new();
        let nodes: Vec<usize> = (0..5).map(|_| uf.make_set()).collect();
        assert!(uf.union(nodes[0], nodes[1]));
        assert!(uf.union(nodes[3], nodes[4]));
        assert!(uf.union(nodes[1], nodes[4]));
        assert!(!uf.union(nodes[0], nodes[3]));

        let root = uf.find(nodes[0]);
        assert_eq!(uf.find(nodes[4]), root);
        assert_eq!(uf.find(nodes[3]), root);
        assert_ne!(uf.find(nodes[2]), root);
    }

    #[test]
    fn test_equal_rank_keeps_first_root() {
        let mut uf = UnionFind::with_len(2);
        uf.union(0, 1);
        assert_eq!(uf.find(1), 0);
    }

    #[test]
    fn test_long_chain_compresses() {
        let mut uf = UnionFind::with_len(1000);
        for node in 1..1000 {
            uf.union(node, node - 1);
        }
        let root = uf.find(999);
        assert!((0..1000).all(|node| uf.find(node) == root));
    }
}
