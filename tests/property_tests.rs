use castgraph::graph::bounded_bfs;
use castgraph::{Keyed, KeyedTable, OrderedSeq, Rated, Rating, RatingIndex};
use proptest::prelude::*;
use std::collections::{HashMap, VecDeque};

#[derive(Debug, Clone, PartialEq)]
struct Record {
    key: i64,
    payload: u32,
    rating: Option<Rating>,
}

impl Keyed for Record {
    fn key(&self) -> i64 {
        self.key
    }
}

impl Rated for Record {
    fn rating(&self) -> Option<Rating> {
        self.rating
    }
}

#[derive(Debug, Clone)]
enum Operation {
    Insert { key: i64, payload: u32 },
    Remove { key: i64 },
}

fn arb_operation() -> impl Strategy<Value = Operation> {
    prop_oneof![
        3 => (-60i64..60, any::<u32>()).prop_map(|(key, payload)| Operation::Insert { key, payload }),
        1 => (-60i64..60).prop_map(|key| Operation::Remove { key }),
    ]
}

fn reference_distances(adjacency: &[Vec<usize>], start: usize) -> Vec<Option<usize>> {
    let mut dist = vec![None; adjacency.len()];
    let mut queue = VecDeque::new();
    dist[start] = Some(0);
    queue.push_back(start);
    while let Some(node) = queue.pop_front() {
        let next = dist[node].map(|d| d + 1);
        for &n in &adjacency[node] {
            if dist[n].is_none() {
                dist[n] = next;
                queue.push_back(n);
            }
        }
    }
    dist
}

proptest! {
    #[test]
    fn prop_table_matches_hashmap(
        capacity in 1usize..32,
        ops in prop::collection::vec(arb_operation(), 1..200)
    ) {
        let mut table = KeyedTable::with_capacity(capacity);
        let mut reference: HashMap<i64, u32> = HashMap::new();

        for op in ops {
            match op {
                Operation::Insert { key, payload } => {
                    let len_before = table.len();
                    let existed = reference.insert(key, payload).is_some();
                    let replaced = table.insert(Record { key, payload, rating: None });
                    prop_assert_eq!(replaced.is_some(), existed);
                    prop_assert_eq!(table.len(), len_before + usize::from(!existed));
                }
                Operation::Remove { key } => {
                    let len_before = table.len();
                    let expected = reference.remove(&key);
                    let removed = table.remove(key).map(|r| r.payload);
                    prop_assert_eq!(removed, expected);
                    prop_assert!(table.find(key).is_none());
                    prop_assert_eq!(table.len(), len_before - usize::from(expected.is_some()));
                }
            }
        }

        prop_assert_eq!(table.len(), reference.len());
        prop_assert_eq!(table.iter().count(), reference.len());
        for (key, payload) in &reference {
            prop_assert_eq!(table.find(*key).map(|r| r.payload), Some(*payload));
        }
    }

    #[test]
    fn prop_rating_range_is_filtered_and_sorted(
        ratings in prop::collection::vec(1u8..=10, 0..80),
        lo in 1u8..=10,
        hi in 1u8..=10
    ) {
        let mut index = RatingIndex::new();
        for (i, r) in ratings.iter().enumerate() {
            index.insert(Record { key: i as i64, payload: 0, rating: Some(Rating::new(*r).unwrap()) });
        }

        let all: Vec<u8> = index.iter().map(|r| r.rating.unwrap().get()).collect();
        let mut sorted = ratings.clone();
        sorted.sort_unstable();
        prop_assert_eq!(&all, &sorted);

        let (lo, hi) = (Rating::new(lo).unwrap(), Rating::new(hi).unwrap());
        let hits: Vec<&Record> = index.range(lo, hi).collect();
        prop_assert!(hits.windows(2).all(|w| w[0].rating <= w[1].rating));
        let mut got: Vec<i64> = hits.iter().map(|r| r.key).collect();
        got.sort_unstable();
        let expected: Vec<i64> = ratings
            .iter()
            .enumerate()
            .filter(|(_, r)| lo.get() <= **r && **r <= hi.get())
            .map(|(i, _)| i as i64)
            .collect();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn prop_bfs_respects_depth_bound(
        nodes in 1usize..25,
        raw_edges in prop::collection::vec((0usize..25, 0usize..25), 0..60),
        start_seed in 0usize..25,
        max_depth in 0usize..5
    ) {
        let edges: Vec<(usize, usize)> = raw_edges
            .into_iter()
            .filter(|(a, b)| *a < nodes && *b < nodes && a != b)
            .collect();
        let start = start_seed % nodes;

        let mut lists: Vec<OrderedSeq<usize>> = (0..nodes).map(|_| OrderedSeq::new()).collect();
        let mut plain: Vec<Vec<usize>> = vec![Vec::new(); nodes];
        for &(a, b) in &edges {
            lists[a].add(b);
            lists[b].add(a);
            plain[a].push(b);
            plain[b].push(a);
        }

        let reach = bounded_bfs(&lists, start, max_depth, nodes);
        prop_assert_eq!(reach.dropped, 0);
        let found: Vec<usize> = reach.found.iter().copied().collect();
        prop_assert!(!found.contains(&start));

        let dist = reference_distances(&plain, start);
        let mut expected: Vec<usize> = (0..nodes)
            .filter(|n| *n != start && dist[*n].map_or(false, |d| d <= max_depth))
            .collect();
        let mut got = found.clone();
        got.sort_unstable();
        expected.sort_unstable();
        prop_assert_eq!(got, expected);

        // Discovery order is breadth-first: distances never decrease.
        let order: Vec<usize> = found.iter().filter_map(|n| dist[*n]).collect();
        prop_assert!(order.windows(2).all(|w| w[0] <= w[1]));
    }
}
