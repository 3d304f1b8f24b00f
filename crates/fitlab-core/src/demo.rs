//! Built-in demo dataset, anchored on a caller-supplied "today".

use crate::types::{Dataset, Exercise, PersonalRecord, WorkoutSession, WorkoutType};
use chrono::{Duration, NaiveDate, NaiveTime};

pub const DEMO_USER: &str = "demo-user";

fn session(
    id: &str,
    title: &str,
    workout_type: WorkoutType,
    date: NaiveDate,
    time: (u32, u32),
    minutes: f64,
) -> WorkoutSession {
    let mut s = WorkoutSession::new(DEMO_USER, title, date);
    s.id = id.to_string();
    s.workout_type = workout_type;
    s.start_time = NaiveTime::from_hms_opt(time.0, time.1, 0);
    s.duration_minutes = Some(minutes);
    s
}

fn upper_body() -> Vec<Exercise> {
    vec![
        Exercise::strength("Bench Press", 4, 8, 80.0)
            .with_category("Chest")
            .with_library_id("lib-bench-press"),
        Exercise::strength("Incline Dumbbell Press", 3, 10, 30.0)
            .with_category("Chest")
            .with_library_id("lib-incline-db-press"),
        Exercise::strength("Cable Flyes", 3, 12, 25.0).with_category("Chest"),
        Exercise::strength("Overhead Press", 4, 8, 50.0)
            .with_category("Shoulders")
            .with_library_id("lib-overhead-press"),
        Exercise::strength("Lateral Raises", 3, 12, 15.0).with_category("Shoulders"),
        Exercise::strength("Tricep Pushdowns", 3, 12, 35.0).with_category("Arms"),
        Exercise::strength("Bicep Curls", 3, 10, 20.0)
            .with_category("Arms")
            .with_library_id("lib-bicep-curl"),
        Exercise::strength("Hammer Curls", 3, 10, 18.0).with_category("Arms"),
    ]
}

fn leg_day() -> Vec<Exercise> {
    vec![
        Exercise::strength("Squat", 5, 5, 140.0)
            .with_category("Legs")
            .with_library_id("lib-back-squat"),
        Exercise::strength("Romanian Deadlift", 4, 8, 100.0)
            .with_category("Back")
            .with_library_id("lib-rdl"),
        Exercise::strength("Leg Press", 4, 10, 180.0).with_category("Legs"),
        Exercise::strength("Walking Lunges", 3, 12, 20.0).with_category("Legs"),
        Exercise::strength("Leg Curls", 3, 12, 40.0).with_category("Legs"),
        Exercise::strength("Calf Raises", 4, 15, 60.0).with_category("Legs"),
    ]
}

fn full_body() -> Vec<Exercise> {
    vec![
        Exercise::strength("Deadlift", 3, 3, 180.0)
            .with_category("Back")
            .with_library_id("lib-deadlift"),
        Exercise::strength("Bench Press", 3, 5, 100.0)
            .with_category("Chest")
            .with_library_id("lib-bench-press"),
        Exercise::strength("Squat", 3, 5, 135.0)
            .with_category("Legs")
            .with_library_id("lib-back-squat"),
        Exercise::strength("Rows", 4, 10, 80.0).with_category("Back"),
        Exercise::strength("Overhead Press", 3, 8, 55.0).with_category("Shoulders"),
        Exercise {
            sets: Some(3),
            reps: Some(12),
            ..Exercise::new("Pull-ups").with_category("Back")
        },
        Exercise {
            sets: Some(3),
            reps: Some(15),
            ..Exercise::new("Dips").with_category("Chest")
        },
        Exercise {
            sets: Some(3),
            ..Exercise::new("Plank").with_category("Core")
        },
        Exercise::strength("Bicep Curls", 3, 10, 22.5).with_category("Arms"),
        Exercise::new("Stretching"),
    ]
}

/// Build the demo dataset: the prototype's workout list, a few weeks of
/// history, two planned sessions and a PR history.
pub fn demo_dataset(today: NaiveDate) -> Dataset {
    let days_ago = |n: i64| today - Duration::days(n);

    let mut upper = session("1", "Upper Body Strength", WorkoutType::Gym, today, (9, 30), 45.0);
    upper.exercises = upper_body();
    upper.notes =
        Some("Great workout! Felt strong on bench press. Might increase weight next session.".into());

    let mut run = session("2", "Morning Run", WorkoutType::Running, days_ago(1), (6, 45), 32.0);
    run.distance_km = Some(5.2);

    let mut legs = session("3", "Leg Day", WorkoutType::Gym, days_ago(2), (17, 0), 52.0);
    legs.exercises = leg_day();

    let mut jog = session("4", "Evening Jog", WorkoutType::Running, days_ago(3), (18, 30), 28.0);
    jog.distance_km = Some(4.1);

    let mut full = session("5", "Full Body Workout", WorkoutType::Gym, days_ago(4), (10, 0), 60.0);
    full.exercises = full_body();

    let mut intervals =
        session("6", "Interval Training", WorkoutType::Running, days_ago(5), (7, 0), 35.0);
    intervals.distance_km = Some(6.0);

    let mut sessions = vec![upper, run, legs, jog, full, intervals];

    // Older history: alternating upper/leg blocks every few days.
    for (i, offset) in [9_i64, 12, 16, 19, 23, 30, 37, 44, 58, 72].iter().enumerate() {
        let id = format!("h{}", i + 1);
        let mut s = if i % 2 == 0 {
            let mut s = session(&id, "Upper Body Strength", WorkoutType::Gym, days_ago(*offset), (9, 0), 50.0);
            s.exercises = upper_body();
            s
        } else {
            let mut s = session(&id, "Leg Day", WorkoutType::Gym, days_ago(*offset), (17, 30), 55.0);
            s.exercises = leg_day();
            s
        };
        // Lighter loads further back, so the volume trend climbs.
        let factor = 1.0 - (*offset as f64 / 400.0);
        for ex in &mut s.exercises {
            ex.weight = ex.weight.map(|w| (w * factor * 2.0).round() / 2.0);
        }
        sessions.push(s);
    }

    let mut planned_push =
        session("p1", "Push Day", WorkoutType::Gym, today + Duration::days(2), (9, 30), 50.0);
    planned_push.is_planned = true;
    planned_push.exercises = upper_body();
    let mut planned_run =
        session("p2", "Tempo Run", WorkoutType::Running, today + Duration::days(4), (7, 0), 40.0);
    planned_run.is_planned = true;
    sessions.push(planned_push);
    sessions.push(planned_run);

    let mut personal_records = vec![
        PersonalRecord::lift("Bench Press", days_ago(40), 110.0, 1),
        PersonalRecord::lift("Squat", days_ago(35), 150.0, 1),
        PersonalRecord::lift("Deadlift", days_ago(30), 190.0, 1),
        PersonalRecord::lift("Bench Press", days_ago(18), 120.0, 1),
        PersonalRecord::lift("Squat", days_ago(13), 160.0, 1),
        PersonalRecord::lift("Deadlift", days_ago(8), 200.0, 1),
        PersonalRecord::lift("Deadlift", days_ago(11), 180.0, 3),
        PersonalRecord::lift("Squat", days_ago(7), 140.0, 5),
        PersonalRecord::lift("Bench Press", days_ago(4), 100.0, 6),
        PersonalRecord::bodyweight("Pull-ups", days_ago(20), 12),
        PersonalRecord::bodyweight("Pull-ups", days_ago(4), 15),
        PersonalRecord::bodyweight("Dips", days_ago(4), 20),
        PersonalRecord::sprint("100m Sprint", days_ago(25), 13.1),
        PersonalRecord::sprint("100m Sprint", days_ago(5), 12.6),
        PersonalRecord::sprint("400m", days_ago(5), 64.3),
    ];
    for (i, pr) in personal_records.iter_mut().enumerate() {
        pr.id = format!("pr{}", i + 1);
        pr.user_id = DEMO_USER.to_string();
    }

    Dataset {
        sessions,
        personal_records,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_dataset_shape() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
        let data = demo_dataset(today);
        assert_eq!(data.sessions.iter().filter(|s| s.is_planned).count(), 2);
        assert!(data.sessions.iter().all(|s| s.user_id == DEMO_USER));
        assert!(data.personal_records.len() >= 10);

        let upper = data.find_session("1").unwrap();
        assert_eq!(upper.date, today);
        assert_eq!(upper.exercises.len(), 8);
        assert_eq!(upper.total_sets(), 26);
    }

    #[test]
    fn test_demo_ids_unique() {
        let data = demo_dataset(NaiveDate::from_ymd_opt(2026, 1, 10).unwrap());
        let mut ids: Vec<_> = data.sessions.iter().map(|s| s.id.clone()).collect();
        let len = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), len);
    }
}
