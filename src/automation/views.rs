//! Catalogue of the host application's predefined plot views.
//!
//! Each view has a short name used in output file names, the suffix the host
//! appends to the load name when exporting its data table, the title shown in
//! the host's view selector, and the exported column names.

use crate::automation::error::ReviewError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlotView {
    pub short_name: &'static str,
    pub file_suffix: &'static str,
    pub title: &'static str,
    pub columns: &'static [&'static str],
}

impl PlotView {
    /// Column names after the leading time column.
    pub fn data_columns(&self) -> &'static [&'static str] {
        &self.columns[1..]
    }

    /// Image file name for this view: `<load>_<short>.png`.
    pub fn image_file_name(&self, load_name: &str) -> String {
        format!("{}_{}.png", load_name, self.short_name)
    }

    /// Exported table file name: `<load><suffix>`.
    pub fn data_file_name(&self, load_name: &str) -> String {
        format!("{}{}", load_name, self.file_suffix)
    }
}

pub const VIEWS: &[PlotView] = &[
    PlotView {
        short_name: "psmc",
        file_suffix: "_1pdeaat_plot.txt",
        title: "ACIS: PSMC",
        columns: &["Time", "1PDEAAT", "PIN1AT", "Pitch", "Roll", "Sun_Body_Y"],
    },
    PlotView {
        short_name: "dpa",
        file_suffix: "_dpa_plot.txt",
        title: "ACIS: DPA",
        columns: &[
            "Time", "1DPAMZT", "DPA0", "Pitch", "Roll", "Sun_Body_Y", "SimPos", "FEP_Count",
            "CCD_Count", "Vid_Board", "Clocking",
        ],
    },
    PlotView {
        short_name: "dea",
        file_suffix: "_dea_plot.txt",
        title: "ACIS: DEA",
        columns: &[
            "Time", "1DEAMZT", "DEA0", "Pitch", "Roll", "Sun_Body_Y", "SimPos", "FEP_Count",
            "CCD_Count", "Vid_Board", "Clocking",
        ],
    },
    PlotView {
        short_name: "tank",
        file_suffix: "_pftank2t_plot.txt",
        title: "Spacecraft: Fuel Tank",
        columns: &[
            "Time", "PFTANK2T", "PFTANKIP", "PF0TANK2T", "Pitch", "Roll", "Sun_Body_Y",
        ],
    },
    PlotView {
        short_name: "aca",
        file_suffix: "_aca_plot.txt",
        title: "Spacecraft: Aspect Camera",
        columns: &["Time", "AACCCDPT", "ACA0", "Pitch", "Roll"],
    },
    PlotView {
        short_name: "mups",
        file_suffix: "_mups_valves_plot.txt",
        title: "Spacecraft: MUPS Valves",
        columns: &[
            "Time", "PM1THV2T", "PM1THV2T_0", "PM2THV1T", "PM2THV1T_0", "PM2THV1T_1",
        ],
    },
    PlotView {
        short_name: "cc",
        file_suffix: "_tcylaft6_plot.txt",
        title: "Spacecraft: Central Cylinder",
        columns: &["Time", "TCYLAFT6", "TCYLAFT6_0", "Pitch", "Roll"],
    },
    PlotView {
        short_name: "oba",
        file_suffix: "_4rt700t_plot.txt",
        title: "OBA: Forward Bulkhead",
        columns: &["Time", "4RT700T", "4RT700T_0", "Pitch", "Roll"],
    },
    PlotView {
        short_name: "pline03t",
        file_suffix: "_pline03t_plot.txt",
        title: "PLINE03T",
        columns: &["Time", "PLINE03T", "PLINE03T_0", "Pitch", "Roll"],
    },
    PlotView {
        short_name: "pline04t",
        file_suffix: "_pline04t_plot.txt",
        title: "PLINE04T",
        columns: &["Time", "PLINE04T", "PLINE04T_0", "Pitch", "Roll"],
    },
    PlotView {
        short_name: "hrc",
        file_suffix: "_2ceahvpt_plot.txt",
        title: "ISIM: HRC CEA",
        columns: &[
            "Time", "2CEAHVPT", "CEA0", "CEA1", "15V", "24V", "HRCI", "HRCS", "Shield", "5V_A",
            "5V_B", "Pitch", "Roll", "SimPos", "FEP_Count", "CCD_Count", "Vid_Board",
            "Clocking", "DH_Heater",
        ],
    },
    PlotView {
        short_name: "acisfp",
        file_suffix: "_acis_fp_plot.txt",
        title: "ISIM: ACIS FP",
        columns: &[
            "Time", "FPTEMP", "FPTEMP_Rel", "Solid_Angle", "in_out", "1CBAT", "SIM_PX", "Pitch",
            "Roll", "Sun_Body_Y", "SimPos", "FEP_Count", "CCD_Count", "Vid_Board", "Clocking",
            "CTI", "Radmon_Enabled", "DH_Heater", "ACIS_NIL_Undercover", "SI", "Cold_FP",
            "FPTEMP_Limit", "Within_Limit",
        ],
    },
];

/// Views captured and reported by default, in order.
pub const PLOT_ORDER: &[&str] = &[
    "oba", "tank", "mups", "psmc", "dpa", "dea", "aca", "pline03t", "pline04t", "acisfp",
];

/// Looks up a view by short name (case-insensitive).
pub fn find_view(short_name: &str) -> Result<&'static PlotView, ReviewError> {
    VIEWS
        .iter()
        .find(|v| v.short_name.eq_ignore_ascii_case(short_name.trim()))
        .ok_or_else(|| ReviewError::UnknownView(short_name.to_string()))
}

/// Resolves a list of short names, or the default plot order when `None`.
pub fn resolve_views(names: Option<&[String]>) -> Result<Vec<&'static PlotView>, ReviewError> {
    match names {
        Some(names) => names.iter().map(|n| find_view(n)).collect(),
        None => PLOT_ORDER.iter().map(|n| find_view(n)).collect(),
    }
}
