//! Tests for the historical results store

#[cfg(test)]
mod tests {
    use super::super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = "\
id,season,division,round,localTeam,visitorTeam,localGoals,visitorGoals,date
1,2016-17,1,1,Real Madrid,Barcelona,2,1,19/08/2016
2,2016-17,1,1,Barcelona,Real Madrid,3,1,20/08/2016
3,2016-17,1,2,Real Madrid,Sevilla,4,0,26/08/2016
4,2016-17,1,2,Sevilla,Barcelona,1,1,27/08/2016
5,2016-17,1,3,Valencia,Real Madrid,,2,02/09/2016
6,2016-17,1,3,Barcelona,Sevilla,NA,0,03/09/2016
";

    fn write_csv(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    fn approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-12,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_load_drops_incomplete_rows() {
        let (records, dropped) =
            read_records(SAMPLE.as_bytes(), &DatasetConfig::default()).unwrap();
        assert_eq!(records.len(), 4);
        assert_eq!(dropped, 2);
        assert_eq!(records[0], MatchRecord::new("Real Madrid", "Barcelona", 2.0, 1.0));
    }

    #[test]
    fn test_team_means_per_venue() {
        let file = write_csv(SAMPLE);
        let aggregator = Aggregator::load_path(file.path()).unwrap();
        assert_eq!(aggregator.len(), 4);

        approx(aggregator.team_goal_profile("Real Madrid", Venue::Home), 3.0);
        approx(aggregator.team_goal_profile("Barcelona", Venue::Home), 3.0);
        approx(aggregator.team_goal_profile("Sevilla", Venue::Home), 1.0);
        approx(aggregator.team_goal_profile("Barcelona", Venue::Away), 1.0);
        approx(aggregator.team_goal_profile("Real Madrid", Venue::Away), 1.0);
        approx(aggregator.team_goal_profile("Sevilla", Venue::Away), 0.0);
    }

    #[test]
    fn test_unknown_team_gets_mean_of_team_means() {
        let records = vec![
            MatchRecord::new("A", "B", 3.0, 1.0),
            MatchRecord::new("A", "C", 1.0, 0.0),
            MatchRecord::new("B", "A", 0.0, 2.0),
        ];
        let aggregator = Aggregator::from_records(&records);

        // Home means: A = 2.0, B = 0.0, so the fallback is 1.0 rather than 4/3
        approx(aggregator.fallback_mean(Venue::Home), 1.0);
        approx(aggregator.team_goal_profile("Unknown", Venue::Home), 1.0);
        // Away means: B = 1.0, C = 0.0, A = 2.0
        approx(aggregator.team_goal_profile("Unknown", Venue::Away), 1.0);
        // C never played at home
        approx(aggregator.team_goal_profile("C", Venue::Home), 1.0);
    }

    #[test]
    fn test_list_teams_sorted_and_unique() {
        let file = write_csv(SAMPLE);
        let aggregator = Aggregator::load_path(file.path()).unwrap();
        // Valencia only appears on a dropped row
        assert_eq!(
            aggregator.list_teams(),
            &["Barcelona", "Real Madrid", "Sevilla"]
        );
    }

    #[test]
    fn test_custom_columns_and_bom() {
        let contents = "\u{feff}home,away,hg,ag\nCadiz,Getafe,1.0,2.0\n";
        let file = write_csv(contents);
        let config = DatasetConfig {
            path: file.path().to_string_lossy().into_owned(),
            home_team_column: "home".to_string(),
            away_team_column: "away".to_string(),
            home_goals_column: "hg".to_string(),
            away_goals_column: "ag".to_string(),
        };
        let aggregator = Aggregator::load(&config).unwrap();
        approx(aggregator.team_goal_profile("Cadiz", Venue::Home), 1.0);
        approx(aggregator.team_goal_profile("Getafe", Venue::Away), 2.0);
    }

    #[test]
    fn test_missing_file_fails() {
        let err = Aggregator::load_path("/nonexistent/FMEL_Dataset.csv").unwrap_err();
        assert!(matches!(err, PredictError::Io(_)));
    }

    #[test]
    fn test_missing_column_fails() {
        let file = write_csv("localTeam,visitorTeam,localGoals\nA,B,1\n");
        let err = Aggregator::load_path(file.path()).unwrap_err();
        match err {
            PredictError::MissingColumn(column) => assert_eq!(column, "visitorGoals"),
            other => panic!("Expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn test_non_numeric_goals_fail() {
        let file = write_csv("localTeam,visitorTeam,localGoals,visitorGoals\nA,B,two,1\n");
        let err = Aggregator::load_path(file.path()).unwrap_err();
        match err {
            PredictError::InvalidGoals { line, column, value } => {
                assert_eq!(line, 2);
                assert_eq!(column, "localGoals");
                assert_eq!(value, "two");
            }
            other => panic!("Expected InvalidGoals, got {other:?}"),
        }
    }

    #[test]
    fn test_negative_goals_fail() {
        let file = write_csv("localTeam,visitorTeam,localGoals,visitorGoals\nA,B,1,-1\n");
        assert!(matches!(
            Aggregator::load_path(file.path()),
            Err(PredictError::InvalidGoals { .. })
        ));
    }

    #[test]
    fn test_all_rows_dropped_still_loads() {
        let file = write_csv("localTeam,visitorTeam,localGoals,visitorGoals\nA,,1,1\n,B,0,0\n");
        let aggregator = Aggregator::load_path(file.path()).unwrap();
        assert!(aggregator.is_empty());
        assert!(aggregator.list_teams().is_empty());
        assert_eq!(aggregator.team_goal_profile("A", Venue::Home), 0.0);
        assert_eq!(aggregator.team_goal_profile("B", Venue::Away), 0.0);
    }

    #[test]
    fn test_short_rows_are_dropped() {
        let (records, dropped) = read_records(
            "localTeam,visitorTeam,localGoals,visitorGoals\nA,B,1\nC,D,0,2\n".as_bytes(),
            &DatasetConfig::default(),
        )
        .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(dropped, 1);
    }

    #[test]
    fn test_over_long_rows_fail() {
        let result = read_records(
            "localTeam,visitorTeam,localGoals,visitorGoals\nA,B,1,2\nC,D,0,1,junk,more\n"
                .as_bytes(),
            &DatasetConfig::default(),
        );
        match result {
            Err(PredictError::MalformedRow {
                line,
                expected,
                found,
            }) => {
                assert_eq!(line, 3);
                assert_eq!(expected, 4);
                assert_eq!(found, 6);
            }
            other => panic!("expected MalformedRow, got {other:?}"),
        }
    }

    #[test]
    fn test_pandas_na_markers_are_dropped() {
        let csv = "\
localTeam,visitorTeam,localGoals,visitorGoals
Real Madrid,Barcelona,2,1
NULL,Barcelona,1,1
Real Madrid,n/a,3,0
<NA>,Sevilla,0,0
#N/A,Sevilla,1,0
Sevilla,Barcelona,-nan,1
Sevilla,Valencia,1.#QNAN,2
";
        let (records, dropped) = read_records(csv.as_bytes(), &DatasetConfig::default()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(dropped, 6);

        let aggregator = Aggregator::from_records(&records);
        assert_eq!(aggregator.list_teams(), ["Barcelona", "Real Madrid"]);
    }

    #[test]
    fn test_aggregator_is_goal_profile_source() {
        let aggregator = Aggregator::from_records(&[MatchRecord::new("A", "B", 2.0, 1.0)]);
        let expected = crate::model::ExpectedGoals::for_fixture(&aggregator, "A", "B");
        assert_eq!(expected, crate::model::ExpectedGoals::new(2.0, 1.0));
    }
}
