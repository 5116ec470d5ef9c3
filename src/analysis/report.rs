//! Load review text reports.
//!
//! - Ending configuration: last propagated value of each tracked column,
//!   used to seed the next review schedule.
//! - Thermal report: per view, start values of both schedules, NaN-ignoring
//!   extremes of the reviewed schedule, and its end values.

use anyhow::{anyhow, Context, Result};
use log::info;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::analysis::plot_data::{format_number, nan_argmax, nan_argmin, ColumnData, PlotTable};
use crate::automation::PlotView;
use crate::paths::load_file;

const RULE_WIDTH: usize = 79;

/// Columns carried into the ending configuration.
pub const PROPAGATED_NAMES: &[&str] = &[
    "PM1THV2T",
    "PM1THV2T_0",
    "PM2THV1T",
    "PM2THV1T_0",
    "PM2THV1T_1",
    "1PDEAAT",
    "PIN1AT",
    "TCYLAFT6",
    "TCYLAFT6_0",
    "1DPAMZT",
    "DPA0",
    "PFTANK2T",
    "PF0TANK2T",
    "SimPos",
    "chips",
    "FEP_Count",
    "CCD_Count",
    "Vid_Board",
    "Clocking",
    "AACCCDPT",
    "ACA0",
    "4RT700T",
    "4RT700T_0",
    "1DEAMZT",
    "DEA0",
    "Roll",
    "Sun_Body_Y",
    "PLINE03T",
    "PLINE03T_0",
    "PLINE04T",
    "PLINE04T_0",
    "2CEAHVPT",
    "CEA0",
    "CEA1",
    "15V",
    "24V",
    "HRCI",
    "HRCS",
    "Shield",
    "5V_A",
    "5V_B",
    "FPTEMP",
    "FPTEMP_Rel",
    "Solid_Angle",
    "in_out",
    "1CBAT",
    "CTI",
    "Radmon_Enabled",
    "DH_Heater",
    "ACIS_NIL_Undercover",
    "SI",
    "Cold_FP",
    "FPTEMP_Limit",
    "Within_Limit",
];

pub fn ending_configuration_path(dir: &Path, prop: &str) -> PathBuf {
    load_file(dir, prop, "_Ending_Configuration.txt")
}

pub fn thermal_report_path(dir: &Path, review: &str) -> PathBuf {
    load_file(dir, review, "_Thermal_Load_Review_Report.txt")
}

fn load_table(dir: &Path, load_name: &str, view: &PlotView) -> Result<PlotTable> {
    let table = PlotTable::from_file(&load_file(dir, load_name, view.file_suffix), view)?;
    if table.is_empty() {
        return Err(anyhow!(
            "{} has no data rows",
            view.data_file_name(load_name)
        ));
    }
    Ok(table)
}

fn column<'a>(table: &'a PlotTable, name: &str) -> Result<&'a ColumnData> {
    table
        .column(name)
        .ok_or_else(|| anyhow!("Missing column {}", name))
}

/// Writes the propagation ending configuration for `views`.
pub fn write_ending_configuration<W: Write>(
    out: &mut W,
    dir: &Path,
    prop: &str,
    views: &[&PlotView],
) -> Result<()> {
    for (num, view) in views.iter().enumerate() {
        let table = load_table(dir, prop, view)?;
        let last = table.len() - 1;

        if num == 0 {
            writeln!(out, "Time of Validity:  {}", table.times()[last])?;
        }

        for name in view.data_columns() {
            if !PROPAGATED_NAMES.contains(name) {
                continue;
            }
            let value = column(&table, name)?
                .format_at(last)
                .ok_or_else(|| anyhow!("Column {} is short", name))?;
            writeln!(out, " {} : {}", name, value)?;
        }
    }
    Ok(())
}

/// Writes `<prop>_Ending_Configuration.txt` into `dir`.
pub fn write_ending_configuration_file(
    dir: &Path,
    prop: &str,
    views: &[&PlotView],
) -> Result<PathBuf> {
    let path = ending_configuration_path(dir, prop);
    let file = File::create(&path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    let mut out = BufWriter::new(file);
    write_ending_configuration(&mut out, dir, prop, views)?;
    out.flush()?;
    info!("Wrote propagation ending data to {}", path.display());
    Ok(path)
}

fn write_values<W: Write>(
    out: &mut W,
    table: &PlotTable,
    names: &[&str],
    row: usize,
) -> Result<()> {
    for name in names {
        let value = column(table, name)?
            .format_at(row)
            .ok_or_else(|| anyhow!("Column {} is short", name))?;
        writeln!(out, "    {}: {}", name, value)?;
    }
    Ok(())
}

fn write_extremes<W: Write>(
    out: &mut W,
    table: &PlotTable,
    names: &[&str],
    pick: fn(&[f64]) -> Option<usize>,
) -> Result<()> {
    for name in names {
        let Some(values) = table.numeric(name) else {
            continue;
        };
        let index = pick(values).ok_or_else(|| anyhow!("All {} values are NaN", name))?;
        writeln!(
            out,
            "    {}: {}  ({})",
            name,
            format_number(values[index]),
            table.times()[index]
        )?;
    }
    Ok(())
}

/// Writes one view's report block.
pub fn write_view_report<W: Write>(
    out: &mut W,
    view: &PlotView,
    prop: &PlotTable,
    review: &PlotTable,
) -> Result<()> {
    let names = view.data_columns();
    let rule = "-".repeat(RULE_WIDTH);

    let prop_start = prop
        .times()
        .first()
        .ok_or_else(|| anyhow!("Propagation {} table has no data rows", view.short_name))?;
    let review_times = review.times();
    let (review_start, review_end) = match (review_times.first(), review_times.last()) {
        (Some(start), Some(end)) => (start, end),
        _ => {
            return Err(anyhow!(
                "Reviewed {} table has no data rows",
                view.short_name
            ));
        }
    };
    let last = review_times.len() - 1;

    writeln!(out, "{}", rule)?;
    writeln!(out, "{} Report", view.title)?;
    writeln!(out, "{}\n", rule)?;

    writeln!(out, "Propagation:")?;
    writeln!(out, "------------")?;
    writeln!(out, "Start:    {}", prop_start)?;
    write_values(out, prop, names, 0)?;

    writeln!(out, "\nReviewed Schedule:")?;
    writeln!(out, "-------------------")?;
    writeln!(out, "Start:    {}", review_start)?;
    write_values(out, review, names, 0)?;

    writeln!(out, "\nMax Values:")?;
    write_extremes(out, review, names, nan_argmax)?;

    writeln!(out, "\nMin Values:")?;
    write_extremes(out, review, names, nan_argmin)?;

    writeln!(out, "\nEnd: {}", review_end)?;
    write_values(out, review, names, last)?;

    write!(out, "\n\n\n")?;
    Ok(())
}

/// Writes the thermal load review report comparing `prop` and `review`.
pub fn write_thermal_report<W: Write>(
    out: &mut W,
    dir: &Path,
    prop: &str,
    review: &str,
    views: &[&PlotView],
) -> Result<()> {
    for view in views {
        let prop_table = load_table(dir, prop, view)?;
        let review_table = load_table(dir, review, view)?;
        write_view_report(out, view, &prop_table, &review_table)?;
    }
    Ok(())
}

/// Writes `<review>_Thermal_Load_Review_Report.txt` into `dir` and echoes
/// the report to stdout.
pub fn write_thermal_report_file(
    dir: &Path,
    prop: &str,
    review: &str,
    views: &[&PlotView],
) -> Result<PathBuf> {
    let mut report = Vec::new();
    write_thermal_report(&mut report, dir, prop, review, views)?;

    let path = thermal_report_path(dir, review);
    std::fs::write(&path, &report)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    handle.write_all(&report)?;
    handle.flush()?;

    info!("Wrote thermal report data to {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automation::find_view;
    use std::fs;
    use tempfile::tempdir;

    fn write_table(dir: &Path, load: &str, view: &PlotView, rows: &[&str]) {
        let mut content = view.columns.join(" ");
        content.push('\n');
        for row in rows {
            content.push_str(row);
            content.push('\n');
        }
        fs::write(load_file(dir, load, view.file_suffix), content).unwrap();
    }

    #[test]
    fn test_ending_configuration() {
        let dir = tempdir().unwrap();
        let aca = find_view("aca").unwrap();
        let pline = find_view("pline03t").unwrap();
        write_table(
            dir.path(),
            "MAY0712A",
            aca,
            &["2012:128:00:00:00.000 -15.0 -14.0 90.0 0.0", "2012:129:00:00:00.000 -13.5 -13.0 100.0 2.5"],
        );
        write_table(
            dir.path(),
            "MAY0712A",
            pline,
            &["2012:128:00:00:00.000 60.0 59.0 90.0 0.0", "2012:129:00:00:00.000 61.25 60.0 100.0 3.0"],
        );

        let mut out = Vec::new();
        write_ending_configuration(&mut out, dir.path(), "MAY0712A", &[aca, pline]).unwrap();
        let text = String::from_utf8(out).unwrap();

        // Pitch is not a propagated name, Roll is.
        assert_eq!(
            text,
            "Time of Validity:  2012:129:00:00:00.000\n \
             AACCCDPT : -13.500000\n \
             ACA0 : -13.000000\n \
             Roll : 2.500000\n \
             PLINE03T : 61.250000\n \
             PLINE03T_0 : 60.000000\n \
             Roll : 3.000000\n"
        );
    }

    #[test]
    fn test_ending_configuration_file() {
        let dir = tempdir().unwrap();
        let aca = find_view("aca").unwrap();
        write_table(dir.path(), "MAY0712A", aca, &["2012:128:00:00:00.000 -15.0 -14.0 90.0 0.0"]);

        let path = write_ending_configuration_file(dir.path(), "MAY0712A", &[aca]).unwrap();

        assert_eq!(path, dir.path().join("MAY0712A_Ending_Configuration.txt"));
        let text = fs::read_to_string(path).unwrap();
        assert!(text.starts_with("Time of Validity:  2012:128:00:00:00.000\n"));
    }

    #[test]
    fn test_view_report_layout() {
        let view = find_view("aca").unwrap();
        let prop = PlotTable::parse(
            "h\n2012:128:00:00:00.000 -15.0 -14.0 90.0 0.0\n",
            view,
        )
        .unwrap();
        let review = PlotTable::parse(
            "h\n\
             2012:129:00:00:00.000 -14.0 -13.0 90.0 0.0\n\
             2012:129:01:00:00.000 -11.0 nan 150.0 1.0\n\
             2012:129:02:00:00.000 -16.0 -12.0 45.0 -1.0\n",
            view,
        )
        .unwrap();

        let mut out = Vec::new();
        write_view_report(&mut out, view, &prop, &review).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "-".repeat(79));
        assert_eq!(lines[1], "Spacecraft: Aspect Camera Report");
        assert_eq!(lines[3], "");
        assert_eq!(lines[4], "Propagation:");
        assert_eq!(lines[6], "Start:    2012:128:00:00:00.000");
        assert_eq!(lines[7], "    AACCCDPT: -15.000000");
        assert!(text.contains("Reviewed Schedule:\n-------------------\nStart:    2012:129:00:00:00.000\n"));
        assert!(text.contains("Max Values:\n    AACCCDPT: -11.000000  (2012:129:01:00:00.000)\n    ACA0: -12.000000  (2012:129:02:00:00.000)\n"));
        assert!(text.contains("Min Values:\n    AACCCDPT: -16.000000  (2012:129:02:00:00.000)\n    ACA0: -13.000000  (2012:129:00:00:00.000)\n"));
        assert!(text.contains("End: 2012:129:02:00:00.000\n    AACCCDPT: -16.000000\n"));
        assert!(text.ends_with("    Roll: -1.000000\n\n\n\n"));
    }

    #[test]
    fn test_text_columns_skip_extremes() {
        let view = find_view("hrc").unwrap();
        let mut row: Vec<String> = (0..view.columns.len()).map(|i| format!("{}", i)).collect();
        row[0] = "2012:128:00:00:00.000".to_string();
        row[4] = "ON".to_string();
        let content = format!("h\n{}\n", row.join(" "));
        let table = PlotTable::parse(&content, view).unwrap();

        let mut out = Vec::new();
        write_view_report(&mut out, view, &table, &table).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("    15V: ON\n"));
        let max_section = text.split("Max Values:").nth(1).unwrap();
        let max_section = max_section.split("Min Values:").next().unwrap();
        assert!(!max_section.contains("15V"));
        assert!(max_section.contains("2CEAHVPT: 1.000000"));
    }

    #[test]
    fn test_thermal_report_file() {
        let dir = tempdir().unwrap();
        let aca = find_view("aca").unwrap();
        write_table(dir.path(), "MAY0712A", aca, &["2012:128:00:00:00.000 -15.0 -14.0 90.0 0.0"]);
        write_table(dir.path(), "MAY1412A", aca, &["2012:135:00:00:00.000 -12.0 -11.0 90.0 0.0"]);

        let path = write_thermal_report_file(dir.path(), "MAY0712A", "MAY1412A", &[aca]).unwrap();

        assert_eq!(path, dir.path().join("MAY1412A_Thermal_Load_Review_Report.txt"));
        let text = fs::read_to_string(path).unwrap();
        assert!(text.contains("Start:    2012:128:00:00:00.000"));
        assert!(text.contains("End: 2012:135:00:00:00.000"));
    }

    #[test]
    fn test_missing_table_is_error() {
        let dir = tempdir().unwrap();
        let aca = find_view("aca").unwrap();
        let err = write_thermal_report(&mut Vec::new(), dir.path(), "MAY0712A", "MAY1412A", &[aca])
            .unwrap_err();
        assert!(format!("{:#}", err).contains("MAY0712A_aca_plot.txt"));
    }

    #[test]
    fn test_view_report_rejects_empty_tables() {
        let view = find_view("aca").unwrap();
        let full = PlotTable::parse("h\n2012:128:00:00:00.000 -15.0 -14.0 90.0 0.0\n", view).unwrap();
        let empty = PlotTable::parse("Time AACCCDPT ACA0 Pitch Roll\n", view).unwrap();
        assert!(empty.is_empty());

        let err = write_view_report(&mut Vec::new(), view, &full, &empty).unwrap_err();
        assert!(err.to_string().contains("Reviewed aca table has no data rows"));

        let err = write_view_report(&mut Vec::new(), view, &empty, &full).unwrap_err();
        assert!(err.to_string().contains("Propagation aca table has no data rows"));
    }

    #[test]
    fn test_all_nan_column_is_error() {
        let view = find_view("aca").unwrap();
        let table = PlotTable::parse("h\n2012:128:00:00:00.000 nan -14.0 90.0 0.0\n", view).unwrap();
        let err = write_view_report(&mut Vec::new(), view, &table, &table).unwrap_err();
        assert!(err.to_string().contains("AACCCDPT"));
    }
}
