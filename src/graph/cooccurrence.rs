#![forbid(unsafe_code)]

//! Co-occurrence graph construction and bounded breadth-first search.

use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::model::{Actor, Movie};
use crate::primitives::{OrderedSeq, RingQueue};
use crate::storage::KeyedTable;
use crate::types::ActorId;

/// Default bound on indexed actors, shared by the BFS queue.
pub const MAX_ACTORS: usize = 2000;
/// Default bound on the per-movie cast buffer used while linking.
pub const DEFAULT_MAX_CAST: usize = 100;

/// Fixed ceilings applied while building and traversing a [`CoGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphLimits {
    /// Maximum number of actors assigned a dense index. Also the BFS queue
    /// capacity.
    pub max_actors: usize,
    /// Maximum number of cast members considered per movie; the rest of a
    /// larger cast is ignored.
    pub max_cast: usize,
}

impl Default for GraphLimits {
    fn default() -> Self {
        Self {
            max_actors: MAX_ACTORS,
            max_cast: DEFAULT_MAX_CAST,
        }
    }
}

/// Actors reached by a bounded BFS.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reach {
    /// Discovered dense indices in discovery order, start excluded.
    pub found: OrderedSeq<usize>,
    /// Discoveries whose neighbors were not explored because the queue was
    /// full. Zero unless the capacity ceiling was hit.
    pub dropped: usize,
}

/// Undirected actor graph with an edge for every pair of actors sharing a
/// movie. Edges are dense indices, and an edge is repeated once per shared
/// movie.
#[derive(Debug)]
pub struct CoGraph {
    actor_ids: Vec<ActorId>,
    adjacency: Vec<OrderedSeq<usize>>,
    limits: GraphLimits,
}

impl CoGraph {
    /// Builds the graph from the current contents of both tables.
    pub fn build(
        actors: &KeyedTable<Actor>,
        movies: &KeyedTable<Movie>,
        limits: GraphLimits,
    ) -> Self {
        let mut actor_ids = Vec::with_capacity(limits.max_actors.min(actors.len()));
        for actor in actors {
            if actor_ids.len() == limits.max_actors {
                warn!(
                    max_actors = limits.max_actors,
                    total = actors.len(),
                    "graph.build.actor_limit"
                );
                break;
            }
            actor_ids.push(actor.id);
        }

        let mut graph = Self {
            adjacency: (0..actor_ids.len()).map(|_| OrderedSeq::new()).collect(),
            actor_ids,
            limits,
        };

        let mut edges = 0usize;
        for movie in movies {
            let mut members: SmallVec<[usize; 16]> = SmallVec::new();
            for actor_id in &movie.cast {
                if members.len() == limits.max_cast {
                    warn!(
                        movie = movie.id.0,
                        cast = movie.cast.len(),
                        max_cast = limits.max_cast,
                        "graph.build.cast_truncated"
                    );
                    break;
                }
                if let Some(idx) = graph.index_of(*actor_id) {
                    members.push(idx);
                }
            }
            for (pos, &a) in members.iter().enumerate() {
                for &b in &members[pos + 1..] {
                    if a != b {
                        graph.adjacency[a].add(b);
                        graph.adjacency[b].add(a);
                        edges += 1;
                    }
                }
            }
        }

        debug!(
            actors = graph.actor_ids.len(),
            movies = movies.len(),
            edges,
            "graph.build.complete"
        );
        graph
    }

    /// Number of indexed actors.
    pub fn actor_count(&self) -> usize {
        self.actor_ids.len()
    }

    /// Dense index of `actor`, found by linear scan.
    pub fn index_of(&self, actor: ActorId) -> Option<usize> {
        self.actor_ids.iter().position(|id| *id == actor)
    }

    /// Actor key stored at `index`.
    pub fn actor_at(&self, index: usize) -> Option<ActorId> {
        self.actor_ids.get(index).copied()
    }

    /// Dense actor keys in index order.
    pub fn actor_ids(&self) -> &[ActorId] {
        &self.actor_ids
    }

    /// Neighbor indices of `index`, one entry per shared movie.
    pub fn neighbors(&self, index: usize) -> Option<&OrderedSeq<usize>> {
        self.adjacency.get(index)
    }

    /// Adjacency lists indexed by dense actor index.
    pub fn adjacency(&self) -> &[OrderedSeq<usize>] {
        &self.adjacency
    }

    /// Actors within `max_depth` hops of `start`. See [`bounded_bfs`].
    pub fn find_connected(&self, start: usize, max_depth: usize) -> Reach {
        bounded_bfs(&self.adjacency, start, max_depth, self.limits.max_actors)
    }
}

/// Breadth-first search from `start` over `adjacency`, following at most
/// `max_depth` edges. Frontier entries are held in a ring of
/// `queue_capacity` slots; when it is full a discovered index is still
/// reported but not expanded. An out-of-range `start` yields nothing.
pub fn bounded_bfs(
    adjacency: &[OrderedSeq<usize>],
    start: usize,
    max_depth: usize,
    queue_capacity: usize,
) -> Reach {
    let mut reach = Reach::default();
    if start >= adjacency.len() {
        return reach;
    }

    let mut visited = vec![false; adjacency.len()];
    let mut queue: RingQueue<(usize, usize)> = RingQueue::with_capacity(queue_capacity);
    visited[start] = true;
    if queue.push((start, 0)).is_err() {
        reach.dropped += 1;
    }

    while let Some((index, depth)) = queue.pop() {
        if depth >= max_depth {
            continue;
        }
        for &neighbor in &adjacency[index] {
            if neighbor >= visited.len() || visited[neighbor] {
                continue;
            }
            visited[neighbor] = true;
            reach.found.add(neighbor);
            if queue.push((neighbor, depth + 1)).is_err() {
                reach.dropped += 1;
            }
        }
    }

    if reach.dropped > 0 {
        warn!(
            start,
            max_depth,
            queue_capacity,
            dropped = reach.dropped,
            "graph.bfs.queue_full"
        );
    }
    reach
}
