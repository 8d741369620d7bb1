use crate::domain::models::event::Event;

/// Pure pre-submission checks mirroring the reservation engine's business
/// rules. These run against whatever candidate list the client has assembled
/// and may be marginally stale; the engine re-validates everything before
/// committing, so nothing here authorizes persistence.

pub fn has_slot_conflict(selection: &[Event], slot: i32) -> bool {
    selection.iter().any(|event| event.slot == slot)
}

pub fn has_club_conflict(selection: &[Event], club_name: &str) -> bool {
    selection.iter().any(|event| event.club_name == club_name)
}

pub fn is_at_daily_cap(selection: &[Event], max_events_per_day: usize) -> bool {
    selection.len() >= max_events_per_day
}

pub fn can_add(candidate: &Event, selection: &[Event], max_events_per_day: usize) -> bool {
    !has_slot_conflict(selection, candidate.slot)
        && !has_club_conflict(selection, &candidate.club_name)
        && !is_at_daily_cap(selection, max_events_per_day)
}

/// Names the first rule the candidate would break, for UX messaging.
pub fn rejection_reason(
    candidate: &Event,
    selection: &[Event],
    max_events_per_day: usize,
) -> Option<String> {
    if has_slot_conflict(selection, candidate.slot) {
        return Some(format!("another selected event already occupies slot {}", candidate.slot));
    }
    if has_club_conflict(selection, &candidate.club_name) {
        return Some(format!("another selected event already belongs to {}", candidate.club_name));
    }
    if is_at_daily_cap(selection, max_events_per_day) {
        return Some(format!("at most {} events may be booked per day", max_events_per_day));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::event::NewEventParams;

    fn event(name: &str, club: &str, slot: i32) -> Event {
        Event::new(NewEventParams {
            name: name.to_string(),
            venue: "Main Hall".to_string(),
            club_name: club.to_string(),
            slot,
            capacity: 30,
            description: None,
        })
    }

    #[test]
    fn test_empty_selection_accepts_any_candidate() {
        let candidate = event("Chess Open", "Chess Club", 1);
        assert!(can_add(&candidate, &[], 4));
        assert_eq!(rejection_reason(&candidate, &[], 4), None);
    }

    #[test]
    fn test_slot_conflict_detected() {
        let selection = vec![event("Chess Open", "Chess Club", 2)];
        let candidate = event("Robot Demo", "Robotics Club", 2);

        assert!(has_slot_conflict(&selection, 2));
        assert!(!can_add(&candidate, &selection, 4));
        assert!(rejection_reason(&candidate, &selection, 4)
            .is_some_and(|r| r.contains("slot 2")));
    }

    #[test]
    fn test_club_conflict_detected() {
        let selection = vec![event("Chess Open", "Chess Club", 1)];
        let candidate = event("Chess Blitz", "Chess Club", 3);

        assert!(has_club_conflict(&selection, "Chess Club"));
        assert!(!can_add(&candidate, &selection, 4));
    }

    #[test]
    fn test_daily_cap_boundary() {
        let selection = vec![
            event("A", "Club A", 1),
            event("B", "Club B", 2),
            event("C", "Club C", 3),
        ];

        assert!(!is_at_daily_cap(&selection, 4));
        let candidate = event("D", "Club D", 4);
        assert!(can_add(&candidate, &selection, 4));

        assert!(is_at_daily_cap(&selection, 3));
        assert!(!can_add(&candidate, &selection, 3));
    }
}
