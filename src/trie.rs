//! Dictionary trie with resumable longest-match search.
//!
//! Nodes live in an arena (`Vec`) and refer to children by index, so a
//! partial match can be carried across calls as a plain [`Hit`] value
//! without borrowing the trie. Child storage starts as a small sorted
//! array (binary-searched) and is promoted to a map once the fanout
//! grows past the array limit.

use std::collections::HashMap;

/// Child-array size above which a node switches to map storage.
const ARRAY_LIMIT: usize = 3;

/// Index of a node in the arena. The root is always node 0.
pub(crate) type NodeId = u32;

const ROOT: NodeId = 0;

/// Child storage for one node.
#[derive(Debug, Clone)]
enum Children {
    /// Up to [`ARRAY_LIMIT`] children, sorted by character.
    Few(Vec<(char, NodeId)>),
    /// Promoted storage for larger fanout.
    Many(HashMap<char, NodeId>),
}

impl Children {
    fn get(&self, c: char) -> Option<NodeId> {
        match self {
            Children::Few(arr) => arr
                .binary_search_by_key(&c, |&(ch, _)| ch)
                .ok()
                .map(|i| arr[i].1),
            Children::Many(map) => map.get(&c).copied(),
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            Children::Few(arr) => arr.is_empty(),
            Children::Many(map) => map.is_empty(),
        }
    }
}

/// A node in the trie.
#[derive(Debug, Clone)]
struct DictNode {
    children: Children,
    /// Whether the path from the root to this node is a live entry.
    /// Disabled terminals fail completion but keep their subtree.
    enabled: bool,
}

impl DictNode {
    fn new() -> Self {
        DictNode {
            children: Children::Few(Vec::new()),
            enabled: false,
        }
    }
}

/// A match in progress or its outcome.
///
/// `complete` and `prefix` are independent: a span can be a full entry
/// and at the same time the prefix of a longer one. While `prefix`
/// holds, the hit carries the node to resume from.
#[derive(Debug, Clone)]
pub struct Hit {
    begin: usize,
    end: usize,
    node: Option<NodeId>,
    complete: bool,
    prefix: bool,
}

impl Hit {
    fn new(begin: usize) -> Self {
        Hit {
            begin,
            end: begin,
            node: None,
            complete: false,
            prefix: false,
        }
    }

    /// Position of the first matched character.
    pub fn begin(&self) -> usize {
        self.begin
    }

    /// Position of the last matched character (inclusive).
    pub fn end(&self) -> usize {
        self.end
    }

    /// The matched span is a complete, enabled dictionary entry.
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// The matched span is a strict prefix of at least one entry.
    pub fn is_prefix(&self) -> bool {
        self.prefix
    }

    /// Neither complete nor a prefix.
    pub fn is_unmatched(&self) -> bool {
        !self.complete && !self.prefix
    }
}

/// A trie over dictionary entries, one `char` per edge.
#[derive(Debug, Clone)]
pub struct DictTrie {
    nodes: Vec<DictNode>,
    word_count: usize,
}

impl Default for DictTrie {
    fn default() -> Self {
        DictTrie::new()
    }
}

impl DictTrie {
    /// Create an empty trie.
    pub fn new() -> Self {
        DictTrie {
            nodes: vec![DictNode::new()],
            word_count: 0,
        }
    }

    /// Number of enabled entries.
    pub fn len(&self) -> usize {
        self.word_count
    }

    /// Whether no enabled entries exist.
    pub fn is_empty(&self) -> bool {
        self.word_count == 0
    }

    /// Insert a word, enabling its terminal node. Re-inserting a
    /// disabled word re-enables it.
    pub fn insert(&mut self, word: &str) {
        let mut node = ROOT;
        for c in word.chars() {
            node = self.get_or_create(node, c);
        }
        if node != ROOT && !self.nodes[node as usize].enabled {
            self.nodes[node as usize].enabled = true;
            self.word_count += 1;
        }
    }

    /// Disable a word without detaching its nodes: the entry stops
    /// completing, but longer entries passing through it still match.
    /// Returns whether an enabled entry was found.
    pub fn disable(&mut self, word: &str) -> bool {
        let mut node = ROOT;
        for c in word.chars() {
            match self.nodes[node as usize].children.get(c) {
                Some(next) => node = next,
                None => return false,
            }
        }
        if node != ROOT && self.nodes[node as usize].enabled {
            self.nodes[node as usize].enabled = false;
            self.word_count -= 1;
            true
        } else {
            false
        }
    }

    /// Match `length` characters of `buf` starting at `begin`.
    pub fn match_in(&self, buf: &[char], begin: usize, length: usize) -> Hit {
        self.match_from(ROOT, buf, begin, length, Hit::new(begin))
    }

    /// Resume a prior prefix match by one character at `cursor`.
    /// The hit's flags are recomputed from scratch; its begin is kept.
    pub fn match_with_hit(&self, buf: &[char], cursor: usize, hit: &Hit) -> Hit {
        let resumed = Hit::new(hit.begin);
        match hit.node {
            Some(node) => self.match_from(node, buf, cursor, 1, resumed),
            // Resuming a non-prefix hit cannot match anything.
            None => Hit {
                end: cursor,
                ..resumed
            },
        }
    }

    fn match_from(
        &self,
        from: NodeId,
        buf: &[char],
        begin: usize,
        length: usize,
        mut hit: Hit,
    ) -> Hit {
        let mut node = from;
        for idx in begin..begin + length {
            hit.end = idx;
            match self.nodes[node as usize].children.get(buf[idx]) {
                Some(next) => node = next,
                None => return hit,
            }
        }
        let last = &self.nodes[node as usize];
        if last.enabled {
            hit.complete = true;
        }
        if !last.children.is_empty() {
            hit.prefix = true;
            hit.node = Some(node);
        }
        hit
    }

    /// Convenience probe: is the exact span an enabled entry?
    pub fn contains(&self, buf: &[char], begin: usize, length: usize) -> bool {
        length > 0 && self.match_in(buf, begin, length).is_complete()
    }

    fn get_or_create(&mut self, parent: NodeId, c: char) -> NodeId {
        if let Some(existing) = self.nodes[parent as usize].children.get(c) {
            return existing;
        }
        let child = self.nodes.len() as NodeId;
        self.nodes.push(DictNode::new());
        match &mut self.nodes[parent as usize].children {
            Children::Few(arr) if arr.len() < ARRAY_LIMIT => {
                let pos = arr.partition_point(|&(ch, _)| ch < c);
                arr.insert(pos, (c, child));
            }
            Children::Few(arr) => {
                // Fourth child: migrate the array wholesale into a map.
                let mut map: HashMap<char, NodeId> = arr.drain(..).collect();
                map.insert(c, child);
                self.nodes[parent as usize].children = Children::Many(map);
            }
            Children::Many(map) => {
                map.insert(c, child);
            }
        }
        child
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_insert_and_match() {
        let mut trie = DictTrie::new();
        trie.insert("中国");
        trie.insert("中国人");

        let buf = chars("中国人");
        let hit = trie.match_in(&buf, 0, 2);
        assert!(hit.is_complete());
        assert!(hit.is_prefix(), "中国 is also a prefix of 中国人");

        let hit = trie.match_in(&buf, 0, 3);
        assert!(hit.is_complete());
        assert!(!hit.is_prefix());

        let hit = trie.match_in(&buf, 0, 1);
        assert!(!hit.is_complete());
        assert!(hit.is_prefix());
    }

    #[test]
    fn test_unmatched() {
        let mut trie = DictTrie::new();
        trie.insert("中国");
        let buf = chars("日本");
        assert!(trie.match_in(&buf, 0, 1).is_unmatched());
    }

    #[test]
    fn test_resumable_match() {
        let mut trie = DictTrie::new();
        trie.insert("中国人");

        let buf = chars("中国人");
        let hit = trie.match_in(&buf, 0, 1);
        assert!(hit.is_prefix());

        let hit = trie.match_with_hit(&buf, 1, &hit);
        assert!(hit.is_prefix());
        assert!(!hit.is_complete());
        assert_eq!(hit.begin(), 0);
        assert_eq!(hit.end(), 1);

        let hit = trie.match_with_hit(&buf, 2, &hit);
        assert!(hit.is_complete());
        assert_eq!(hit.begin(), 0);
        assert_eq!(hit.end(), 2);
    }

    #[test]
    fn test_disable_keeps_descendants() {
        let mut trie = DictTrie::new();
        trie.insert("中国");
        trie.insert("中国人");
        assert_eq!(trie.len(), 2);

        assert!(trie.disable("中国"));
        assert_eq!(trie.len(), 1);

        let buf = chars("中国人");
        let hit = trie.match_in(&buf, 0, 2);
        assert!(!hit.is_complete(), "disabled entry must not complete");
        assert!(hit.is_prefix(), "longer entry must still be reachable");
        assert!(trie.match_in(&buf, 0, 3).is_complete());
    }

    #[test]
    fn test_disable_unknown_word() {
        let mut trie = DictTrie::new();
        trie.insert("中国");
        assert!(!trie.disable("日本"));
        assert!(!trie.disable("中")); // path exists, not an entry
    }

    #[test]
    fn test_reinsert_reenables() {
        let mut trie = DictTrie::new();
        trie.insert("中国");
        trie.disable("中国");
        trie.insert("中国");
        assert_eq!(trie.len(), 1);
        assert!(trie.contains(&chars("中国"), 0, 2));
    }

    #[test]
    fn test_array_to_map_promotion() {
        let mut trie = DictTrie::new();
        // Five distinct first characters force the root past the
        // array limit.
        for w in ["一", "二", "三", "四", "五"] {
            trie.insert(w);
        }
        assert_eq!(trie.len(), 5);
        for w in ["一", "二", "三", "四", "五"] {
            let buf: Vec<char> = w.chars().collect();
            assert!(trie.contains(&buf, 0, 1), "lost {w} after promotion");
        }
    }
}
