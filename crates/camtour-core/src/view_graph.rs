//! Proximity graph between camera viewpoints.
//!
//! Two cameras are connected when their centers are closer than a threshold.
//! The graph drives highlighting only; it says nothing about reachability.

use std::collections::BTreeSet;

use glam::Vec3;

use crate::pose::CameraPose;

/// An undirected edge, stored with the smaller index first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge(usize, usize);

impl Edge {
    /// Creates an edge between two distinct cameras.
    ///
    /// Returns `None` for a self-edge.
    #[must_use]
    pub fn new(a: usize, b: usize) -> Option<Self> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(Self(a, b)),
            std::cmp::Ordering::Greater => Some(Self(b, a)),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Smaller endpoint.
    #[must_use]
    pub fn low(self) -> usize {
        self.0
    }

    /// Larger endpoint.
    #[must_use]
    pub fn high(self) -> usize {
        self.1
    }

    /// Returns the endpoint opposite `index`, if `index` is on this edge.
    #[must_use]
    pub fn other(self, index: usize) -> Option<usize> {
        if index == self.0 {
            Some(self.1)
        } else if index == self.1 {
            Some(self.0)
        } else {
            None
        }
    }
}

/// Symmetric adjacency over camera indices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewGraph {
    edges: BTreeSet<Edge>,
    adjacency: Vec<BTreeSet<usize>>,
    max_connection_distance: f32,
}

impl ViewGraph {
    /// Connects every pair of cameras closer than `max_connection_distance`.
    ///
    /// This is an exhaustive pairwise scan; camera counts are in the tens.
    #[must_use]
    pub fn build(poses: &[CameraPose], max_connection_distance: f32) -> Self {
        let mut graph = Self::default();
        graph.rebuild(poses, max_connection_distance);
        graph
    }

    /// Replaces the graph with one built from `poses`.
    pub fn rebuild(&mut self, poses: &[CameraPose], max_connection_distance: f32) {
        self.edges.clear();
        self.adjacency.clear();
        self.adjacency.resize(poses.len(), BTreeSet::new());
        self.max_connection_distance = max_connection_distance;

        for (i, a) in poses.iter().enumerate() {
            for (j, b) in poses.iter().enumerate().skip(i + 1) {
                if a.distance(b) < max_connection_distance {
                    self.edges.insert(Edge(i, j));
                    self.adjacency[i].insert(j);
                    self.adjacency[j].insert(i);
                }
            }
        }

        log::info!(
            "view graph: {} cameras, {} edges (threshold {})",
            poses.len(),
            self.edges.len(),
            max_connection_distance
        );
    }

    /// Threshold the graph was built with.
    #[must_use]
    pub fn max_connection_distance(&self) -> f32 {
        self.max_connection_distance
    }

    /// Returns all edges in ascending order.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.edges.iter().copied()
    }

    /// Number of edges.
    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Returns true if no two cameras are connected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Number of cameras the graph was built over.
    #[must_use]
    pub fn num_cameras(&self) -> usize {
        self.adjacency.len()
    }

    /// Returns whether `a` and `b` are connected. A camera is never connected
    /// to itself.
    #[must_use]
    pub fn are_connected(&self, a: usize, b: usize) -> bool {
        Edge::new(a, b).is_some_and(|edge| self.edges.contains(&edge))
    }

    /// Cameras connected to `index`, in ascending order.
    pub fn neighbors(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        self.adjacency
            .get(index)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    /// Number of cameras connected to `index`.
    #[must_use]
    pub fn degree(&self, index: usize) -> usize {
        self.adjacency.get(index).map_or(0, BTreeSet::len)
    }

    /// Edge endpoints as world-space segments, for drawing the graph.
    #[must_use]
    pub fn line_segments(&self, poses: &[CameraPose]) -> Vec<(Vec3, Vec3)> {
        self.edges
            .iter()
            .filter_map(|edge| {
                let a = poses.get(edge.0)?;
                let b = poses.get(edge.1)?;
                Some((a.position(), b.position()))
            })
            .collect()
    }
}
