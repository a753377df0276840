//! Collision classification.
//!
//! Raw contact pairs from the physics substrate are interpreted into
//! domain-level effects here. Classification is purely tag-driven: a ball
//! touching any tagged body scores and dies, a ball touching untagged
//! geometry just bounces, and everything else is discarded.

use serde::{Deserialize, Serialize};

use crate::body::{BodyId, BodyKind, BodyStore};

/// Effect produced by classifying one contact.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ContactEffect {
    ScoreChanged { delta: i64 },
    DestroyBody { id: BodyId },
}

/// Classifies a contact between two body ids.
///
/// The sides may arrive in either order. The event is silently discarded
/// when either id is already gone (an earlier contact in the same step may
/// have destroyed it), or when the pair is not exactly one ball against one
/// non-ball — balls only ever touch static geometry in this design, so
/// those branches only guard against duplicate or ghost events from the
/// substrate.
pub fn classify(store: &BodyStore, id_a: BodyId, id_b: BodyId) -> Vec<ContactEffect> {
    let (Some(a), Some(b)) = (store.get(id_a), store.get(id_b)) else {
        return Vec::new();
    };

    let (ball, object) = match (a.kind == BodyKind::Ball, b.kind == BodyKind::Ball) {
        (true, false) => (a, b),
        (false, true) => (b, a),
        _ => return Vec::new(),
    };

    match object.tag {
        Some(tag) => vec![
            ContactEffect::ScoreChanged {
                delta: tag.score_delta(),
            },
            ContactEffect::DestroyBody { id: ball.id },
        ],
        // Bouncer, obstacle, or boundary: the bounce itself is handled
        // entirely by the physics substrate.
        None => Vec::new(),
    }
}
