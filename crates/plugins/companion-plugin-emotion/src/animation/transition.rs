//! Animation transition planning
//!
//! Animations may only change along edges of a static compatibility graph.
//! When the requested animation is not directly reachable from what is on
//! screen, the planner picks one intermediate step, preferring the hub, and
//! otherwise returns to the hub. A plan never spans more than two hops.

use crate::types::AnimationId;
use companion_core::{CompanionError, Result};
use std::collections::{BTreeMap, BTreeSet};

use crate::types::AnimationId as A;

/// Directed compatibility edges
pub const DEFAULT_EDGES: &[(AnimationId, &[AnimationId])] = &[
    (
        A::Idle,
        &[
            A::Happy,
            A::Excited,
            A::Curious,
            A::Confused,
            A::Surprised,
            A::Concerned,
            A::Sad,
            A::Angry,
        ],
    ),
    (A::Happy, &[A::Idle, A::Excited, A::Curious, A::Surprised]),
    (A::Excited, &[A::Idle, A::Happy, A::Surprised]),
    (A::Curious, &[A::Idle, A::Happy, A::Confused, A::Surprised]),
    (A::Confused, &[A::Idle, A::Curious, A::Concerned]),
    (
        A::Surprised,
        &[A::Idle, A::Happy, A::Excited, A::Confused, A::Curious],
    ),
    (A::Concerned, &[A::Idle, A::Sad, A::Confused]),
    (A::Sad, &[A::Idle, A::Concerned]),
    (A::Angry, &[A::Idle, A::Concerned]),
];

/// Read-only directed graph over the animation catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionGraph {
    edges: BTreeMap<AnimationId, BTreeSet<AnimationId>>,
}

impl TransitionGraph {
    /// The built-in graph
    pub fn standard() -> Result<Self> {
        Self::from_edges(DEFAULT_EDGES)
    }

    /// Build a graph; every animation other than the hub must have a direct
    /// edge to the hub
    pub fn from_edges(edges: &[(AnimationId, &[AnimationId])]) -> Result<Self> {
        let mut map: BTreeMap<AnimationId, BTreeSet<AnimationId>> =
            AnimationId::ALL.iter().map(|a| (*a, BTreeSet::new())).collect();

        for (from, targets) in edges {
            let set = map.entry(*from).or_default();
            set.extend(targets.iter().copied().filter(|t| t != from));
        }

        for (node, targets) in &map {
            if *node != AnimationId::HUB && !targets.contains(&AnimationId::HUB) {
                return Err(CompanionError::config(format!(
                    "transition graph: '{}' has no edge to hub '{}'",
                    node,
                    AnimationId::HUB
                )));
            }
        }

        Ok(Self { edges: map })
    }

    /// Whether `from → to` is a direct edge
    pub fn has_edge(&self, from: AnimationId, to: AnimationId) -> bool {
        self.edges.get(&from).is_some_and(|s| s.contains(&to))
    }

    /// Direct successors of `from`
    pub fn neighbors(&self, from: AnimationId) -> impl Iterator<Item = AnimationId> + '_ {
        self.edges.get(&from).into_iter().flatten().copied()
    }

    /// Number of edges needed to get from `from` to `to`, up to two
    pub fn hops(&self, from: AnimationId, to: AnimationId) -> Option<usize> {
        if from == to {
            Some(0)
        } else if self.has_edge(from, to) {
            Some(1)
        } else if self.neighbors(from).any(|m| self.has_edge(m, to)) {
            Some(2)
        } else {
            None
        }
    }
}

/// Chooses the next animation to show
#[derive(Debug, Clone)]
pub struct TransitionPlanner {
    graph: TransitionGraph,
}

impl TransitionPlanner {
    /// Planner over the built-in graph
    pub fn new() -> Result<Self> {
        Ok(Self::with_graph(TransitionGraph::standard()?))
    }

    /// Planner over a custom graph
    pub fn with_graph(graph: TransitionGraph) -> Self {
        Self { graph }
    }

    /// Graph in use
    pub fn graph(&self) -> &TransitionGraph {
        &self.graph
    }

    /// Next animation on the way from `current` to `candidate`
    pub fn plan(&self, current: AnimationId, candidate: AnimationId) -> AnimationId {
        if current == candidate || self.graph.has_edge(current, candidate) {
            return candidate;
        }

        let via_hub = self.graph.has_edge(current, AnimationId::HUB)
            && self.graph.has_edge(AnimationId::HUB, candidate);
        if via_hub {
            return AnimationId::HUB;
        }

        let step = AnimationId::ALL
            .into_iter()
            .find(|m| self.graph.has_edge(current, *m) && self.graph.has_edge(*m, candidate));

        match step {
            Some(m) => m,
            None => {
                tracing::debug!(%current, %candidate, "No two-hop path; returning to hub");
                AnimationId::HUB
            }
        }
    }

    /// [`TransitionPlanner::plan`] over raw identifiers. Unknown identifiers
    /// are logged and treated as the hub.
    pub fn plan_raw(&self, current: &str, candidate: &str) -> AnimationId {
        self.plan(
            AnimationId::parse_or_hub(current),
            AnimationId::parse_or_hub(candidate),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn planner() -> TransitionPlanner {
        TransitionPlanner::new().unwrap()
    }

    #[test]
    fn test_standard_graph_is_valid() {
        let graph = TransitionGraph::standard().unwrap();
        for a in AnimationId::ALL {
            if a != AnimationId::HUB {
                assert!(graph.has_edge(a, AnimationId::HUB), "{} lacks hub edge", a);
            }
            assert!(graph.has_edge(AnimationId::HUB, a) || a == AnimationId::HUB);
        }
    }

    #[test]
    fn test_missing_hub_edge_rejected() {
        let edges: &[(AnimationId, &[AnimationId])] = &[
            (A::Idle, &[A::Happy]),
            (A::Happy, &[A::Excited]),
        ];
        let err = TransitionGraph::from_edges(edges).unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn test_identity_plan() {
        let planner = planner();
        for a in AnimationId::ALL {
            assert_eq!(planner.plan(a, a), a);
        }
    }

    #[test]
    fn test_direct_edge() {
        assert_eq!(planner().plan(A::Happy, A::Excited), A::Excited);
        assert_eq!(planner().plan(A::Idle, A::Angry), A::Angry);
    }

    #[test]
    fn test_routes_through_hub() {
        assert_eq!(planner().plan(A::Sad, A::Excited), A::Idle);
        assert_eq!(planner().plan(A::Angry, A::Happy), A::Idle);
    }

    #[test]
    fn test_non_hub_intermediate() {
        let edges: &[(AnimationId, &[AnimationId])] = &[
            (A::Idle, &[A::Happy]),
            (A::Happy, &[A::Idle, A::Excited]),
            (A::Excited, &[A::Idle]),
            (A::Curious, &[A::Idle, A::Happy]),
            (A::Confused, &[A::Idle]),
            (A::Surprised, &[A::Idle]),
            (A::Concerned, &[A::Idle]),
            (A::Sad, &[A::Idle]),
            (A::Angry, &[A::Idle]),
        ];
        let planner = TransitionPlanner::with_graph(TransitionGraph::from_edges(edges).unwrap());
        assert_eq!(planner.plan(A::Curious, A::Excited), A::Happy);
        assert_eq!(planner.plan(A::Sad, A::Angry), A::Idle);
    }

    #[test]
    fn test_plans_stay_within_two_hops() {
        let planner = planner();
        for from in AnimationId::ALL {
            for to in AnimationId::ALL {
                let next = planner.plan(from, to);
                let hops = planner.graph().hops(from, next);
                assert!(matches!(hops, Some(h) if h <= 2), "{} -> {} gave {}", from, to, next);
            }
        }
    }

    #[test]
    fn test_plan_raw_unknown_is_hub() {
        let planner = planner();
        assert_eq!(planner.plan_raw("dancing", "happy"), A::Happy);
        assert_eq!(planner.plan_raw("sad", "backflip"), A::Idle);
        assert_eq!(planner.plan_raw(" Happy ", "EXCITED"), A::Excited);
    }
}
