//! Renders the three legacy global export files.
//!
//! Every file opens with the same four-line header (format tag, generation
//! timestamp, global subscript declaration, day-counter/year line) and carries
//! two lines per record: a subscript reference embedding the code, then the
//! long description verbatim. The global name and subscript below are the
//! published placeholder values; the real ones are business-specific.

use crate::domain::model::{CodeRecord, ExportFile, RenderContext};

const FORMAT_TAG: &str = "~Format=5.S~";
const NON_DECIMAL_GLOBAL: &str = "^NONDECGBL";
const DECIMAL_GLOBAL: &str = "^DECGBL";
const SUBSCRIPT: &str = "Subscript 1";
const YEAR_LABEL: &str = "PLACEHOLDER FOR YEAR";

/// Decimal presentation of a code: a period after the third character for
/// codes of four or more characters, shorter codes unchanged.
pub fn decimal_form(code: &str) -> String {
    if code.len() < 4 {
        code.to_string()
    } else {
        format!("{}.{}", &code[..3], &code[3..])
    }
}

fn header(global: &str, ctx: &RenderContext) -> String {
    format!(
        "{FORMAT_TAG}\n{}   Cache\n{global}(\"{SUBSCRIPT}\")\n{}_{YEAR_LABEL} {}\n",
        ctx.timestamp, ctx.day_counter, ctx.year
    )
}

fn body(global: &str, records: &[CodeRecord], decimal: bool) -> String {
    let mut out = String::new();
    for record in records {
        let code = if decimal {
            decimal_form(&record.code)
        } else {
            record.code.clone()
        };
        out.push_str(&format!("{global}(\"{SUBSCRIPT}\",\"{code}\")\n"));
        out.push_str(&record.long_description);
    }
    out
}

/// Builds the non-decimal, decimal and combined export files from one shared
/// render context, so all three carry the identical timestamp and day counter.
pub fn render_exports(
    records: &[CodeRecord],
    ctx: &RenderContext,
    file_name_base: &str,
) -> Vec<ExportFile> {
    let non_decimal_body = body(NON_DECIMAL_GLOBAL, records, false);
    let decimal_body = body(DECIMAL_GLOBAL, records, true);

    vec![
        ExportFile {
            name: format!("Non-decimal {file_name_base}{}.go", ctx.year),
            contents: format!("{}{}\n\n", header(NON_DECIMAL_GLOBAL, ctx), non_decimal_body),
        },
        ExportFile {
            name: format!("Decimal {file_name_base}{}.go", ctx.year),
            contents: format!("{}{}\n\n", header(DECIMAL_GLOBAL, ctx), decimal_body),
        },
        // Combined: non-decimal block then decimal block, one header, nothing
        // in between.
        ExportFile {
            name: format!("Combined {file_name_base}{}.go", ctx.year),
            contents: format!(
                "{}{}{}\n\n",
                header(NON_DECIMAL_GLOBAL, ctx),
                non_decimal_body,
                decimal_body
            ),
        },
    ]
}
