//! Dependency graph and cycle detection.

use std::collections::{HashMap, HashSet};

/// Identifier of a task within one batch.
pub type TaskId = i64;

const UNVISITED: usize = usize::MAX;

/// Directed "depends-on" graph over the tasks of one batch.
///
/// Nodes keep the order in which they were added, so traversal is
/// deterministic. Edges to ids that are not nodes of the graph are
/// discarded on construction.
///
/// # Examples
///
/// ```
/// use u_taskrank::graph::DependencyGraph;
///
/// let graph = DependencyGraph::from_edges(vec![
///     (1, vec![2]),
///     (2, vec![1]),
///     (3, vec![1, 99]),
/// ]);
///
/// let cycles = graph.cycle_members();
/// assert!(cycles.contains(&1) && cycles.contains(&2));
/// assert!(!cycles.contains(&3));
/// assert_eq!(graph.dependents_count(1), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    ids: Vec<TaskId>,
    index: HashMap<TaskId, usize>,
    adjacency: Vec<Vec<usize>>,
}

impl DependencyGraph {
    /// Builds a graph from `(task, dependencies)` pairs.
    ///
    /// Repeated task ids are merged into one node. Dependencies that do not
    /// name a task in `edges` are dropped; duplicate entries are kept.
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (TaskId, Vec<TaskId>)>,
    {
        let edges: Vec<(TaskId, Vec<TaskId>)> = edges.into_iter().collect();

        let mut ids = Vec::with_capacity(edges.len());
        let mut index = HashMap::with_capacity(edges.len());
        for (id, _) in &edges {
            index.entry(*id).or_insert_with(|| {
                ids.push(*id);
                ids.len() - 1
            });
        }

        let mut adjacency = vec![Vec::new(); ids.len()];
        for (id, deps) in &edges {
            let from = index[id];
            adjacency[from].extend(deps.iter().filter_map(|dep| index.get(dep).copied()));
        }

        Self {
            ids,
            index,
            adjacency,
        }
    }

    /// Returns the number of tasks in the graph.
    pub fn node_count(&self) -> usize {
        self.ids.len()
    }

    /// Returns the total number of dependency edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    /// Returns `true` if `id` is a node of this graph.
    pub fn contains(&self, id: TaskId) -> bool {
        self.index.contains_key(&id)
    }

    /// Returns the resolved dependencies of `id`, in input order.
    pub fn dependencies(&self, id: TaskId) -> Vec<TaskId> {
        self.index
            .get(&id)
            .map(|&i| self.adjacency[i].iter().map(|&j| self.ids[j]).collect())
            .unwrap_or_default()
    }

    /// Returns how many dependency entries across the graph name `id`.
    pub fn dependents_count(&self, id: TaskId) -> usize {
        match self.index.get(&id) {
            Some(&target) => self
                .adjacency
                .iter()
                .map(|deps| deps.iter().filter(|&&d| d == target).count())
                .sum(),
            None => 0,
        }
    }

    /// Returns the dependents count of every task at once.
    pub fn dependents_counts(&self) -> HashMap<TaskId, usize> {
        let mut counts = vec![0usize; self.ids.len()];
        for &dep in self.adjacency.iter().flatten() {
            counts[dep] += 1;
        }
        self.ids.iter().copied().zip(counts).collect()
    }

    /// Returns every task that lies on at least one dependency cycle.
    ///
    /// Runs an iterative depth-first traversal from each unvisited task,
    /// keeping the tasks of the current path on a stack. An edge back onto
    /// that stack closes a cycle; when the traversal retreats past the
    /// entry point of a strongly connected group, the whole group is
    /// popped and flagged if it has more than one task or a self-loop.
    /// Explored tasks are never expanded twice, so the cost is linear in
    /// tasks plus edges, and the result does not depend on node order.
    pub fn cycle_members(&self) -> HashSet<TaskId> {
        let n = self.ids.len();
        let mut order = vec![UNVISITED; n];
        let mut low = vec![0usize; n];
        let mut on_path = vec![false; n];
        let mut path: Vec<usize> = Vec::new();
        let mut frames: Vec<(usize, usize)> = Vec::new();
        let mut counter = 0usize;
        let mut members = HashSet::new();

        for root in 0..n {
            if order[root] != UNVISITED {
                continue;
            }

            order[root] = counter;
            low[root] = counter;
            counter += 1;
            path.push(root);
            on_path[root] = true;
            frames.push((root, 0));

            while let Some(frame) = frames.last_mut() {
                let node = frame.0;

                if let Some(&dep) = self.adjacency[node].get(frame.1) {
                    frame.1 += 1;
                    if order[dep] == UNVISITED {
                        order[dep] = counter;
                        low[dep] = counter;
                        counter += 1;
                        path.push(dep);
                        on_path[dep] = true;
                        frames.push((dep, 0));
                    } else if on_path[dep] {
                        low[node] = low[node].min(order[dep]);
                    }
                    continue;
                }

                frames.pop();
                if let Some(&(parent, _)) = frames.last() {
                    low[parent] = low[parent].min(low[node]);
                }

                if low[node] == order[node] {
                    let mut group = Vec::new();
                    while let Some(member) = path.pop() {
                        on_path[member] = false;
                        group.push(member);
                        if member == node {
                            break;
                        }
                    }
                    if group.len() > 1 || self.adjacency[node].contains(&node) {
                        members.extend(group.into_iter().map(|i| self.ids[i]));
                    }
                }
            }
        }

        members
    }
}
