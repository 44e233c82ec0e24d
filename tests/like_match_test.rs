mod helpers;

use helpers::build_directory;
use flotilla::service::{DirectoryService, LikeToggleOutcome};
use std::sync::{Arc, Mutex};

fn crew_of_three() -> (DirectoryService, Arc<Mutex<Vec<(String, String)>>>) {
    let (_db, _index, service) = build_directory(&[
        ("alice", "Sea Breeze", "Tom"),
        ("bob", "Sea Breeze", "Tom"),
        ("carol", "Sun Dancer", "Maya"),
    ]);

    let notified: Arc<Mutex<Vec<(String, String)>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&notified);
    let service = service.with_match_notifier(Box::new(move |actor, target| {
        sink.lock()
            .unwrap()
            .push((actor.handle.clone(), target.handle.clone()));
    }));
    (service, notified)
}

#[test]
fn one_sided_like_is_not_a_match() {
    let (service, _) = crew_of_three();

    let outcome = service.request_like_toggle("alice", "bob", true).unwrap();
    assert_eq!(outcome, LikeToggleOutcome::Applied { mutual: false });
    assert!(!service.request_match_check("alice", "bob").unwrap());
    assert!(!service.request_match_check("bob", "alice").unwrap());
}

#[test]
fn reciprocated_like_becomes_mutual_both_directions() {
    let (service, _) = crew_of_three();

    service.request_like_toggle("alice", "bob", true).unwrap();
    let outcome = service.request_like_toggle("bob", "alice", true).unwrap();

    assert_eq!(outcome, LikeToggleOutcome::Applied { mutual: true });
    assert!(service.request_match_check("alice", "bob").unwrap());
    assert!(service.request_match_check("bob", "alice").unwrap());
}

#[test]
fn unlike_while_mutual_keeps_counterpart_edge() {
    let (service, _) = crew_of_three();
    service.request_like_toggle("alice", "bob", true).unwrap();
    service.request_like_toggle("bob", "alice", true).unwrap();

    service.request_like_toggle("alice", "bob", false).unwrap();

    assert!(!service.request_match_check("alice", "bob").unwrap());
    // Bob's like survives Alice's unlike.
    let bobs_likes = service.likes_given("bob").unwrap();
    assert_eq!(bobs_likes.len(), 1);
    assert_eq!(bobs_likes[0].handle, "alice");
}

#[test]
fn self_like_is_rejected() {
    let (service, notified) = crew_of_three();

    let outcome = service.request_like_toggle("alice", "alice", true).unwrap();
    assert_eq!(outcome, LikeToggleOutcome::RejectedSelf);
    assert!(service.likes_given("alice").unwrap().is_empty());
    assert!(notified.lock().unwrap().is_empty());
}

#[test]
fn unknown_target_is_reported_not_stored() {
    let (service, _) = crew_of_three();

    let outcome = service.request_like_toggle("alice", "mallory", true).unwrap();
    assert_eq!(outcome, LikeToggleOutcome::TargetUnknown);
    assert!(service.likes_given("alice").unwrap().is_empty());
}

#[test]
fn liking_twice_is_idempotent() {
    let (service, _) = crew_of_three();

    service.request_like_toggle("alice", "bob", true).unwrap();
    service.request_like_toggle("alice", "bob", true).unwrap();

    assert_eq!(service.likes_given("alice").unwrap().len(), 1);
    assert_eq!(service.likers_of("bob").unwrap().len(), 1);
}

#[test]
fn notifier_fires_once_per_mutual_transition() {
    let (service, notified) = crew_of_three();

    service.request_like_toggle("alice", "bob", true).unwrap();
    assert!(notified.lock().unwrap().is_empty());

    service.request_like_toggle("bob", "alice", true).unwrap();
    assert_eq!(
        *notified.lock().unwrap(),
        vec![("bob".to_string(), "alice".to_string())]
    );

    // Re-liking while already mutual must not re-fire.
    service.request_like_toggle("bob", "alice", true).unwrap();
    assert_eq!(notified.lock().unwrap().len(), 1);

    // Break and re-form the match: a new transition, a new notification.
    service.request_like_toggle("bob", "alice", false).unwrap();
    service.request_like_toggle("bob", "alice", true).unwrap();
    assert_eq!(notified.lock().unwrap().len(), 2);
}

#[test]
fn matches_listing_contains_only_mutuals() {
    let (service, _) = crew_of_three();
    service.request_like_toggle("alice", "bob", true).unwrap();
    service.request_like_toggle("bob", "alice", true).unwrap();
    service.request_like_toggle("alice", "carol", true).unwrap();

    let matches = service.matches_of("alice").unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].handle, "bob");

    assert!(service.matches_of("carol").unwrap().is_empty());
}

#[test]
fn handles_are_normalized_at_the_boundary() {
    let (service, _) = crew_of_three();

    let outcome = service.request_like_toggle("@Alice", "@BOB", true).unwrap();
    assert_eq!(outcome, LikeToggleOutcome::Applied { mutual: false });
    assert_eq!(service.likers_of("bob").unwrap().len(), 1);
    assert!(!service.request_match_check("@Bob", "Alice").unwrap());

    service.request_like_toggle("Bob", "ALICE", true).unwrap();
    assert!(service.request_match_check("@alice", "@bob").unwrap());
}
