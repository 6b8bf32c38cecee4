pub mod formatter;

pub use formatter::{
    change_tone, format_change, format_detail, format_legend, format_percent, format_summary,
    format_tsv, format_view_table, score_bar, should_use_colors,
};
