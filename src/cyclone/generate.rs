use rand::Rng;

use super::record::{CycloneRecord, FormationDate};

const NAME_POOL: [&str; 24] = [
    "Maliksi", "Prapiroon", "Yagi", "Trami", "Kong-rey", "Yinxing", "Toraji", "Man-yi", "Usagi",
    "Bebinca", "Pulasan", "Wutip", "Krathon", "Bailu", "Podul", "Lingling", "Mitag", "Hagibis",
    "Francisco", "Lekima", "Haishen", "Maysak", "Bavi", "Jangmi",
];

// Western Pacific formation climatology: activity peaks July-September.
const MONTH_WEIGHTS: [(u8, f32); 12] = [
    (1, 0.02),
    (2, 0.02),
    (3, 0.03),
    (4, 0.05),
    (5, 0.08),
    (6, 0.12),
    (7, 0.18),
    (8, 0.22),
    (9, 0.15),
    (10, 0.08),
    (11, 0.03),
    (12, 0.02),
];

const WIND_WEIGHTS: [(f32, f32); 6] = [
    (70.0, 0.30),
    (85.0, 0.25),
    (105.0, 0.20),
    (130.0, 0.15),
    (160.0, 0.08),
    (200.0, 0.02),
];

fn weighted_pick<T: Copy>(choices: &[(T, f32)], rng: &mut impl Rng) -> T {
    let total: f32 = choices.iter().map(|(_, weight)| weight).sum();
    let mut roll = rng.random_range(0.0..total);
    for &(value, weight) in choices {
        if roll < weight {
            return value;
        }
        roll -= weight;
    }
    choices[choices.len() - 1].0
}

pub fn generate_season_records(
    year: i32,
    current_year: i32,
    rng: &mut impl Rng,
) -> Vec<CycloneRecord> {
    let count = rng.random_range(5..9usize).min(NAME_POOL.len());

    // Partial Fisher-Yates draw so names within one season never repeat.
    let mut names = NAME_POOL.to_vec();
    for index in 0..count {
        let swap_with = rng.random_range(index..names.len());
        names.swap(index, swap_with);
    }

    (0..count)
        .map(|ordinal| {
            let month = weighted_pick(&MONTH_WEIGHTS, rng);
            let day = rng.random_range(1..29u8);
            let max_wind = weighted_pick(&WIND_WEIGHTS, rng);
            let min_pressure = rng.random_range(920..1000i32) as f32;

            CycloneRecord::new(
                format!("{year}{:02}", ordinal + 1),
                names[ordinal].to_owned(),
                FormationDate { year, month, day },
                max_wind,
                min_pressure,
                current_year,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn season_size_and_fields_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(11);
        for year in 2014..=2030 {
            let records = generate_season_records(year, 2026, &mut rng);
            assert!((5..=8).contains(&records.len()));

            for record in &records {
                assert!((1..=12).contains(&record.formation_date.month));
                assert!((1..=28).contains(&record.formation_date.day));
                assert!(
                    WIND_WEIGHTS
                        .iter()
                        .any(|&(wind, _)| wind == record.max_wind_speed)
                );
                assert!((920.0..1000.0).contains(&record.min_pressure));
                assert_eq!(record.year, year);
                assert_eq!(record.is_prediction, year > 2026);
                assert!(record.validate().is_ok());
            }
        }
    }

    #[test]
    fn names_are_unique_within_a_season() {
        let mut rng = StdRng::seed_from_u64(3);
        let records = generate_season_records(2020, 2026, &mut rng);
        let mut names: Vec<&str> = records.iter().map(|record| record.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), records.len());
    }

    #[test]
    fn same_seed_reproduces_the_same_season() {
        let mut first = StdRng::seed_from_u64(99);
        let mut second = StdRng::seed_from_u64(99);
        let a = generate_season_records(2021, 2026, &mut first);
        let b = generate_season_records(2021, 2026, &mut second);

        assert_eq!(a.len(), b.len());
        for (left, right) in a.iter().zip(&b) {
            assert_eq!(left.id, right.id);
            assert_eq!(left.name, right.name);
            assert_eq!(left.formation_date, right.formation_date);
            assert_eq!(left.max_wind_speed, right.max_wind_speed);
        }
    }

    #[test]
    fn ordinals_format_as_two_digit_ids() {
        let mut rng = StdRng::seed_from_u64(5);
        let records = generate_season_records(2019, 2026, &mut rng);
        assert_eq!(records[0].id, "201901");
        assert!(records.iter().all(|record| record.id.len() == 6));
    }
}
