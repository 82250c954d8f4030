// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Per-service approval tracks and the rendezvous reducer.
//!
//! Each requested service category carries an independent three-state track.
//! The parent lifecycle machine leaves its services-request region only when
//! every requested track is approved, or as soon as any one track is
//! declined. Categories that were never requested are vacuously approved and
//! do not block the rendezvous.

use crate::types::ServiceCategory;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// The state of a single service approval track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceTrack {
    /// Requested, awaiting the service approver's decision.
    Requested,
    /// Approved by the service approver.
    Approved,
    /// Declined. Terminal for the track.
    Declined,
}

/// The outcome of evaluating all requested service tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rendezvous {
    /// At least one requested track is still awaiting a decision.
    Pending,
    /// Every requested track is approved (vacuously true when none were
    /// requested).
    AllApproved,
    /// A track was declined; the category that short-circuited the region.
    AnyDeclined(ServiceCategory),
}

/// Evaluates the rendezvous rule over a set of tracks.
///
/// A declined track wins over pending tracks: the region short-circuits to
/// `AnyDeclined` regardless of how many other tracks are still open.
#[must_use]
pub fn evaluate_rendezvous(tracks: &ServiceTracks) -> Rendezvous {
    let mut pending: bool = false;
    for (category, track) in &tracks.tracks {
        match track {
            ServiceTrack::Declined => return Rendezvous::AnyDeclined(*category),
            ServiceTrack::Requested => pending = true,
            ServiceTrack::Approved => {}
        }
    }
    if pending {
        Rendezvous::Pending
    } else {
        Rendezvous::AllApproved
    }
}

/// The set of service approval tracks for one booking.
///
/// Only requested categories carry a track; absent categories are treated
/// as vacuously approved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceTracks {
    tracks: BTreeMap<ServiceCategory, ServiceTrack>,
}

impl ServiceTracks {
    /// Creates an empty track set (no services requested).
    #[must_use]
    pub const fn none() -> Self {
        Self {
            tracks: BTreeMap::new(),
        }
    }

    /// Creates a track set from the categories requested on submission.
    #[must_use]
    pub fn from_requested(requested: &BTreeSet<ServiceCategory>) -> Self {
        let mut tracks: BTreeMap<ServiceCategory, ServiceTrack> = BTreeMap::new();
        for category in requested {
            tracks.insert(*category, ServiceTrack::Requested);
        }
        Self { tracks }
    }

    /// Returns true if no service was requested.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Returns true if the category was requested on submission.
    #[must_use]
    pub fn is_requested(&self, category: ServiceCategory) -> bool {
        self.tracks.contains_key(&category)
    }

    /// Returns the track for a category, if it was requested.
    #[must_use]
    pub fn track(&self, category: ServiceCategory) -> Option<ServiceTrack> {
        self.tracks.get(&category).copied()
    }

    /// Records an approval on a requested track.
    ///
    /// Returns true if the track existed and was still undecided.
    pub fn approve(&mut self, category: ServiceCategory) -> bool {
        self.decide(category, ServiceTrack::Approved)
    }

    /// Records a decline on a requested track.
    ///
    /// Returns true if the track existed and was still undecided.
    pub fn decline(&mut self, category: ServiceCategory) -> bool {
        self.decide(category, ServiceTrack::Declined)
    }

    fn decide(&mut self, category: ServiceCategory, decision: ServiceTrack) -> bool {
        match self.tracks.get_mut(&category) {
            Some(track @ ServiceTrack::Requested) => {
                *track = decision;
                true
            }
            _ => false,
        }
    }

    /// Forces a track into a state.
    ///
    /// Used by the modification reconciler when carrying recorded approvals
    /// forward onto a rebuilt snapshot.
    pub fn set(&mut self, category: ServiceCategory, track: ServiceTrack) {
        self.tracks.insert(category, track);
    }

    /// The categories that were requested on submission.
    #[must_use]
    pub fn requested(&self) -> BTreeSet<ServiceCategory> {
        self.tracks.keys().copied().collect()
    }

    /// The requested categories whose tracks are approved.
    #[must_use]
    pub fn approved(&self) -> BTreeSet<ServiceCategory> {
        self.tracks
            .iter()
            .filter(|(_, track)| **track == ServiceTrack::Approved)
            .map(|(category, _)| *category)
            .collect()
    }
}

/// Closeout obligations after a booking ends (checkout or cancellation).
///
/// Each approved, requested service must be explicitly closed out before the
/// booking can reach its closed state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloseoutProgress {
    outstanding: BTreeSet<ServiceCategory>,
}

impl CloseoutProgress {
    /// Creates the closeout obligations for a set of approved services.
    #[must_use]
    pub fn for_services(approved: BTreeSet<ServiceCategory>) -> Self {
        Self {
            outstanding: approved,
        }
    }

    /// Returns true if nothing remains to close out.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.outstanding.is_empty()
    }

    /// Returns true if the category still awaits closeout.
    #[must_use]
    pub fn is_outstanding(&self, category: ServiceCategory) -> bool {
        self.outstanding.contains(&category)
    }

    /// Marks a category as closed out.
    ///
    /// Returns true if the category was outstanding.
    pub fn close_out(&mut self, category: ServiceCategory) -> bool {
        self.outstanding.remove(&category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn requested(categories: &[ServiceCategory]) -> ServiceTracks {
        ServiceTracks::from_requested(&categories.iter().copied().collect())
    }

    #[test]
    fn test_empty_tracks_rendezvous_is_all_approved() {
        let tracks = ServiceTracks::none();
        assert_eq!(evaluate_rendezvous(&tracks), Rendezvous::AllApproved);
    }

    #[test]
    fn test_pending_until_every_track_decided() {
        let mut tracks = requested(&[ServiceCategory::Staff, ServiceCategory::Catering]);
        assert_eq!(evaluate_rendezvous(&tracks), Rendezvous::Pending);

        assert!(tracks.approve(ServiceCategory::Staff));
        assert_eq!(evaluate_rendezvous(&tracks), Rendezvous::Pending);

        assert!(tracks.approve(ServiceCategory::Catering));
        assert_eq!(evaluate_rendezvous(&tracks), Rendezvous::AllApproved);
    }

    #[test]
    fn test_decline_short_circuits_pending_tracks() {
        let mut tracks = requested(&[ServiceCategory::Staff, ServiceCategory::Security]);
        assert!(tracks.decline(ServiceCategory::Security));

        assert_eq!(
            evaluate_rendezvous(&tracks),
            Rendezvous::AnyDeclined(ServiceCategory::Security)
        );
    }

    #[test]
    fn test_decided_tracks_cannot_be_redecided() {
        let mut tracks = requested(&[ServiceCategory::Staff]);
        assert!(tracks.approve(ServiceCategory::Staff));
        assert!(!tracks.decline(ServiceCategory::Staff));
        assert_eq!(
            tracks.track(ServiceCategory::Staff),
            Some(ServiceTrack::Approved)
        );
    }

    #[test]
    fn test_unrequested_category_cannot_be_decided() {
        let mut tracks = requested(&[ServiceCategory::Staff]);
        assert!(!tracks.approve(ServiceCategory::Catering));
        assert!(!tracks.is_requested(ServiceCategory::Catering));
    }

    #[test]
    fn test_closeout_completes_only_when_all_closed() {
        let approved: BTreeSet<ServiceCategory> =
            [ServiceCategory::Staff, ServiceCategory::Setup]
                .into_iter()
                .collect();
        let mut progress = CloseoutProgress::for_services(approved);
        assert!(!progress.is_complete());

        assert!(progress.close_out(ServiceCategory::Staff));
        assert!(!progress.is_complete());

        // Closing out twice is a no-op.
        assert!(!progress.close_out(ServiceCategory::Staff));

        assert!(progress.close_out(ServiceCategory::Setup));
        assert!(progress.is_complete());
    }
}
