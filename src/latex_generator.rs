use std::borrow::Cow;

use anyhow::Context;
use log::debug;

use crate::input::Settings;
use crate::report::{DailyTotal, ReportPeriod};
use crate::time::{DateExt, WorkingDuration};
use crate::utils::{self, Resources};
use crate::time_stamp;

const DEFAULT_TEMPLATE: &str = "template.tex";
const DATE_FORMAT: &str = "{day}.{month}.{year}";
const DAY_FORMAT: &str = "{day}.{month}.";

/// A single table row and the hours it adds to the total.
struct Row {
    latex: String,
    credited: WorkingDuration,
}

pub struct LatexGenerator<'a> {
    settings: &'a Settings,
    template: Cow<'static, str>,
}

impl<'a> LatexGenerator<'a> {
    /// Loads the template from the settings or falls back to the bundled one.
    pub fn new(settings: &'a Settings) -> anyhow::Result<Self> {
        let template = match settings.render().template() {
            Some(path) => Cow::Owned(
                utils::read_to_string(path)
                    .with_context(|| format!("failed to read template `{}`", path.display()))?,
            ),
            None => {
                let file = Resources::get(DEFAULT_TEMPLATE)
                    .with_context(|| format!("`{}` should be embedded", DEFAULT_TEMPLATE))?;

                Cow::Owned(String::from_utf8(file.data.into_owned())?)
            }
        };

        Ok(Self { settings, template })
    }

    #[must_use]
    pub fn with_template(settings: &'a Settings, template: impl Into<Cow<'static, str>>) -> Self {
        Self {
            settings,
            template: template.into(),
        }
    }

    fn row(&self, day: &DailyTotal) -> Row {
        let date = day.date();
        let label = date.formatted(DAY_FORMAT);

        let (cells, credited) = match (day.start(), day.vacation()) {
            (Some(mut start), _) => {
                let mut duration = day.worked();
                if self.settings.render().round_to_quarter_hour() {
                    start = start.round_to_quarter_hour();
                    duration = duration.round_to_quarter_hour();
                }

                let end = start + duration.to_duration();

                (
                    format!(
                        "{} & {} & {} & {} & {} & \\\\ \\hline \n",
                        label,
                        start,
                        end,
                        time_stamp!(00:00),
                        duration
                    ),
                    duration,
                )
            }
            (None, Some(paid)) if !date.is_weekend() => (
                format!("{} & \\vacation{{{}}} \\\\ \\hline \n", label, paid),
                paid,
            ),
            _ => (
                format!("{} & & & & \\nosum{{}} & \\\\ \\hline \n", label),
                WorkingDuration::ZERO,
            ),
        };

        let latex = if date.is_weekend() {
            format!("\\weekend%\n{}", cells)
        } else {
            cells
        };

        Row { latex, credited }
    }

    /// Returns the table rows and the sum of the printed hours.
    #[must_use]
    pub fn table_content(&self, period: &ReportPeriod) -> (String, WorkingDuration) {
        period
            .days()
            .iter()
            .map(|day| self.row(day))
            .fold((String::new(), WorkingDuration::ZERO), |(mut table, total), row| {
                table.push_str(&row.latex);
                (table, total + row.credited)
            })
    }

    #[must_use]
    pub fn generate(&self, period: &ReportPeriod) -> String {
        let (table, total) = self.table_content(period);
        debug!("{}: {} hours", period.file_stem(), total);

        let name = self
            .settings
            .about()
            .name()
            .map(ToString::to_string)
            .unwrap_or_default();

        self.template
            .replace("%name%", &name)
            .replace(
                "%period%",
                &format!(
                    "{} -- {}",
                    period.start().formatted(DATE_FORMAT),
                    period.end().formatted(DATE_FORMAT)
                ),
            )
            .replace("%issue_date%", &period.end().formatted(DATE_FORMAT))
            .replace("%total%", &total.to_string())
            .replace("%table%", &table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    use crate::input::{TimeEntry, VacationRange};
    use crate::report::DailyTotals;
    use crate::{date, working_duration};

    fn periods(entries: &[TimeEntry], vacations: &[VacationRange]) -> [ReportPeriod; 2] {
        let mut totals = DailyTotals::from_entries(entries);
        totals
            .merge_vacations_within(vacations, date!(2021:01:15), date!(2021:03:14))
            .unwrap();
        ReportPeriod::split(date!(2021:01:15), &totals).unwrap()
    }

    fn entry(date: crate::time::Date, start: (u32, u32, u32), end: (u32, u32, u32)) -> TimeEntry {
        TimeEntry::new(
            date.and_hms_opt(start.0, start.1, start.2).unwrap(),
            date.and_hms_opt(end.0, end.1, end.2).unwrap(),
        )
        .unwrap()
    }

    fn lines(table: &str) -> Vec<&str> {
        table.lines().collect()
    }

    #[test]
    fn test_worked_day() {
        let settings = Settings::default();
        let generator = LatexGenerator::with_template(&settings, "%table%");
        let [first, _] = periods(
            &[
                entry(date!(2021:01:20), (8, 2, 0), (12, 0, 0)),
                entry(date!(2021:01:20), (12, 30, 0), (16, 41, 0)),
            ],
            &[],
        );

        let (table, total) = generator.table_content(&first);

        // the weekend of the 16th and 17th adds two lines
        assert_eq!(
            lines(&table)[7],
            "20.01. & 08:00 & 16:15 & 00:00 & 8.25 & \\\\ \\hline "
        );
        assert_eq!(total, working_duration!(08:15));
    }

    #[test]
    fn test_without_rounding() {
        let settings: Settings =
            toml::from_str("[render]\nround_to_quarter_hour = false\n").unwrap();
        let generator = LatexGenerator::with_template(&settings, "%table%");
        let [first, _] = periods(&[entry(date!(2021:01:15), (8, 2, 0), (9, 0, 0))], &[]);

        let (table, total) = generator.table_content(&first);

        assert_eq!(
            lines(&table)[0],
            "15.01. & 08:02 & 09:00 & 00:00 & 0.97 & \\\\ \\hline "
        );
        assert_eq!(total, working_duration!(00:58));
    }

    #[test]
    fn test_weekend_and_empty_days() {
        let settings = Settings::default();
        let generator = LatexGenerator::with_template(&settings, "%table%");
        let [first, _] = periods(&[], &[]);

        let (table, total) = generator.table_content(&first);
        let lines = lines(&table);

        // 2021-01-15 is a friday
        assert_eq!(lines[0], "15.01. & & & & \\nosum{} & \\\\ \\hline ");
        assert_eq!(lines[1], "\\weekend%");
        assert_eq!(lines[2], "16.01. & & & & \\nosum{} & \\\\ \\hline ");
        assert_eq!(lines[3], "\\weekend%");
        assert_eq!(lines[4], "17.01. & & & & \\nosum{} & \\\\ \\hline ");
        assert_eq!(lines[5], "18.01. & & & & \\nosum{} & \\\\ \\hline ");
        assert_eq!(total, WorkingDuration::ZERO);
    }

    #[test]
    fn test_vacation_days() {
        let settings = Settings::default();
        let generator = LatexGenerator::with_template(&settings, "%table%");
        let [first, _] = periods(
            &[],
            &[VacationRange::new(date!(2021:01:15), date!(2021:01:18), working_duration!(08:00))
                .unwrap()],
        );

        let (table, total) = generator.table_content(&first);
        let lines = lines(&table);

        assert_eq!(lines[0], "15.01. & \\vacation{8.00} \\\\ \\hline ");
        // no credit is printed on the weekend
        assert_eq!(lines[2], "16.01. & & & & \\nosum{} & \\\\ \\hline ");
        assert_eq!(lines[4], "17.01. & & & & \\nosum{} & \\\\ \\hline ");
        assert_eq!(lines[5], "18.01. & \\vacation{8.00} \\\\ \\hline ");
        assert_eq!(total, working_duration!(16:00));
    }

    #[test]
    fn test_generate_fills_placeholders() {
        let settings: Settings = toml::from_str("[about]\nname = \"Jane_Doe\"\n").unwrap();
        let generator = LatexGenerator::with_template(
            &settings,
            "%name%|%period%|%issue_date%|%total%\n%table%",
        );
        let [_, second] = periods(&[], &[]);

        let document = generator.generate(&second);

        assert_eq!(
            document.lines().next(),
            Some("Jane\\_Doe|15.02.2021 -- 14.03.2021|14.03.2021|0.00")
        );
        assert_eq!(
            document.lines().filter(|line| line.contains("\\hline")).count(),
            28
        );
    }

    #[test]
    fn test_bundled_template() {
        let settings = Settings::default();
        let generator = LatexGenerator::new(&settings).unwrap();
        let [first, _] = periods(&[], &[]);

        let document = generator.generate(&first);

        assert!(document.starts_with("\\documentclass"));
        assert!(document.contains("15.01. & & & & \\nosum{} & \\\\ \\hline "));
        assert!(!document.contains("%table%"));
        assert!(!document.contains("%name%"));
    }

    #[test]
    fn test_generate_is_deterministic() {
        let settings = Settings::default();
        let generator = LatexGenerator::new(&settings).unwrap();
        let entries = [entry(date!(2021:01:20), (8, 0, 0), (16, 0, 0))];

        assert_eq!(
            periods(&entries, &[]).map(|period| generator.generate(&period)),
            periods(&entries, &[]).map(|period| generator.generate(&period)),
        );
    }
}
