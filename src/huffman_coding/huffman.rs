use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

use log::{trace, warn};

use super::freq_table::{FreqTable, SYMBOLS};

/// Every tree holds one leaf per symbol plus the internal nodes that join them.
pub const NODE_COUNT: usize = 2 * SYMBOLS - 1;

/// Leaf or internal node. Children are arena indices owned by the tree.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum NodeData {
    Kids(usize, usize),
    Leaf(u8),
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Node {
    pub weight: u64,
    /// Tie-break ordinal. Leaves are numbered by symbol, internal nodes from 256 up in
    /// merge order, so the id is also the node's index in the arena.
    pub id: usize,
    /// Back link used to derive codes. Never owns the parent.
    pub parent: Option<usize>,
    pub node_data: NodeData,
}

impl Node {
    /// Create a new node
    pub fn new(weight: u64, id: usize, node_data: NodeData) -> Node {
        Node {
            weight,
            id,
            parent: None,
            node_data,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.node_data, NodeData::Leaf(_))
    }
}

/// Priority queue entry. The queue hands out the lowest weight first, then the lowest id.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
struct Queued {
    weight: u64,
    id: usize,
}

impl Ord for Queued {
    /// BinaryHeap is a max-heap, so compare in reverse
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .weight
            .cmp(&self.weight)
            .then_with(|| other.id.cmp(&self.id))
    }
}

impl PartialOrd for Queued {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A Huffman coding tree over all 256 byte values.
///
/// Zero-count symbols are part of the tree too, so a decoder that rebuilds the tree from
/// the header gets exactly the same shape as the encoder did.
#[derive(Debug)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: usize,
}

impl HuffmanTree {
    /// Build the tree from a frequency table.
    ///
    /// All 256 leaves go into a min-queue keyed on (weight, id). The two smallest entries
    /// are popped, the first becoming the left child, and their parent is pushed back
    /// until a single node (the root) remains.
    pub fn build(table: &FreqTable) -> Self {
        let mut nodes: Vec<Node> = table
            .counts()
            .iter()
            .enumerate()
            .map(|(sym, &count)| Node::new(count as u64, sym, NodeData::Leaf(sym as u8)))
            .collect();
        nodes.reserve(NODE_COUNT - SYMBOLS);

        let mut queue: BinaryHeap<Queued> = nodes
            .iter()
            .map(|n| Queued {
                weight: n.weight,
                id: n.id,
            })
            .collect();

        let mut root = 0;
        while let Some(left) = queue.pop() {
            let right = match queue.pop() {
                Some(right) => right,
                None => {
                    root = left.id;
                    break;
                }
            };
            let id = nodes.len();
            let weight = left.weight + right.weight;
            nodes[left.id].parent = Some(id);
            nodes[right.id].parent = Some(id);
            nodes.push(Node::new(weight, id, NodeData::Kids(left.id, right.id)));
            queue.push(Queued { weight, id });
        }

        let tree = Self { nodes, root };
        trace!(
            "Built tree of {} nodes, root weight {}, max depth {}.",
            tree.node_count(),
            tree.nodes[tree.root].weight,
            tree.max_depth()
        );
        tree
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn root(&self) -> &Node {
        &self.nodes[self.root]
    }

    /// Leaves occupy the first 256 arena slots, in symbol order.
    pub fn leaf(&self, symbol: u8) -> &Node {
        &self.nodes[symbol as usize]
    }

    /// Number of edges between `symbol`'s leaf and the root, i.e. its code length.
    pub fn depth(&self, symbol: u8) -> usize {
        let mut depth = 0;
        let mut idx = symbol as usize;
        while let Some(parent) = self.nodes[idx].parent {
            depth += 1;
            idx = parent;
        }
        depth
    }

    /// Longest code length in the tree.
    pub fn max_depth(&self) -> usize {
        (0..=u8::MAX).map(|sym| self.depth(sym)).max().unwrap_or(0)
    }

    /// Walk every leaf up to the root to get its code, root-first.
    pub fn derive_codes(&self) -> CodeTable {
        let codes = (0..SYMBOLS)
            .map(|leaf| {
                let mut bits = Vec::new();
                let mut idx = leaf;
                while let Some(parent) = self.nodes[idx].parent {
                    // A right child contributes a 1
                    bits.push(matches!(self.nodes[parent].node_data, NodeData::Kids(_, r) if r == idx));
                    idx = parent;
                }
                bits.reverse();
                bits
            })
            .collect();
        CodeTable { codes }
    }

    /// Decode one symbol, reading bits from `bits[*cursor]` on and advancing the cursor.
    /// Returns None if the bits run out before a leaf is reached.
    pub fn decode_one(&self, bits: &[bool], cursor: &mut usize) -> Option<u8> {
        let mut idx = self.root;
        loop {
            match self.nodes[idx].node_data {
                NodeData::Leaf(sym) => return Some(sym),
                NodeData::Kids(left, right) => {
                    let bit = *bits.get(*cursor)?;
                    *cursor += 1;
                    idx = if bit { right } else { left };
                }
            }
        }
    }

    /// Tear the tree down breadth first from the root. Returns the number of nodes released.
    ///
    /// Works from a queue rather than recursion, as skewed tables can make the tree up to
    /// 255 levels deep.
    pub fn destroy(self) -> usize {
        let root = self.root;
        let mut slots: Vec<Option<Node>> = self.nodes.into_iter().map(Some).collect();
        let mut queue = VecDeque::from([root]);
        let mut released = 0;

        while let Some(idx) = queue.pop_front() {
            if let Some(node) = slots[idx].take() {
                if let NodeData::Kids(left, right) = node.node_data {
                    queue.push_back(left);
                    queue.push_back(right);
                }
                released += 1;
            }
        }

        if released != slots.len() {
            warn!(
                "Released {} of {} tree nodes; the rest were unreachable.",
                released,
                slots.len()
            );
        }
        released
    }
}

/// Bit code for every symbol, first bit first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: Vec<Vec<bool>>,
}

impl CodeTable {
    pub fn get(&self, symbol: u8) -> &[bool] {
        &self.codes[symbol as usize]
    }

    /// Codes in symbol order.
    pub fn iter(&self) -> impl Iterator<Item = &[bool]> + '_ {
        self.codes.iter().map(|c| c.as_slice())
    }

    /// Total number of bits needed to encode data with these frequencies.
    pub fn encoded_bits(&self, table: &FreqTable) -> u64 {
        table
            .counts()
            .iter()
            .zip(&self.codes)
            .map(|(&count, code)| count as u64 * code.len() as u64)
            .sum()
    }
}
