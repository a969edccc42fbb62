use crate::domain::{
    format_dong, format_measure, format_vnd, InputMode, Orientation, SettlementRow,
    SettlementSheet,
};

const COL_STT: usize = 4;
const COL_CONTENT: usize = 30;
const COL_SIZE: usize = 15;
const COL_AREA: usize = 14;
const COL_PRICE: usize = 13;
const COL_QTY: usize = 6;
const COL_TOTAL: usize = 15;
const TABLE_WIDTH: usize =
    COL_STT + COL_CONTENT + COL_SIZE + COL_AREA + COL_PRICE + COL_QTY + COL_TOTAL + 6;

const EMPTY_FIELD: &str = "...";

/// Printable cells of one row, shared by the text and HTML renderers.
struct RowCells {
    size: String,
    area: String,
    unit_price: String,
    quantity: String,
    total: String,
}

impl RowCells {
    fn new(row: &SettlementRow) -> Self {
        let size = match row.mode {
            InputMode::DimQty => format!(
                "{} x {}",
                format_measure(row.length),
                format_measure(row.width)
            ),
            InputMode::SizeQty => format_measure(row.size),
            _ => String::new(),
        };
        let area = match row.mode {
            InputMode::DimQty => format_measure(row.area()),
            _ => String::new(),
        };
        let (unit_price, quantity) = if row.mode.uses_quantity() {
            (format_dong(row.unit_price), format_measure(row.quantity))
        } else {
            (String::new(), String::new())
        };

        Self {
            size,
            area,
            unit_price,
            quantity,
            total: format_vnd(Some(row.subtotal())),
        }
    }
}

/// Render a sheet as fixed-width text, ready for a terminal or a plain printer.
pub fn render_text(sheet: &SettlementSheet) -> String {
    let mut lines: Vec<String> = Vec::new();
    let rule = "-".repeat(TABLE_WIDTH);

    lines.push(format!("{:^w$}", sheet.title.to_uppercase(), w = TABLE_WIDTH));
    lines.push(format!("{:^w$}", sheet.formatted_date(), w = TABLE_WIDTH));
    lines.push(String::new());
    lines.push(format!("Kính gửi: {}", or_placeholder(&sheet.recipient)));
    lines.push(String::new());

    lines.push(format!(
        "{:>COL_STT$} {:<COL_CONTENT$} {:^COL_SIZE$} {:^COL_AREA$} {:>COL_PRICE$} {:>COL_QTY$} {:>COL_TOTAL$}",
        "STT", "Nội dung công việc", "Kích thước (m)", "Diện tích (m²)", "Đơn giá", "SL", "Thành tiền"
    ));
    lines.push(rule.clone());
    for (index, row) in sheet.rows().iter().enumerate() {
        let cells = RowCells::new(row);
        lines.push(format!(
            "{:>COL_STT$} {:<COL_CONTENT$} {:^COL_SIZE$} {:^COL_AREA$} {:>COL_PRICE$} {:>COL_QTY$} {:>COL_TOTAL$}",
            index + 1,
            truncate(&row.content, COL_CONTENT),
            cells.size,
            cells.area,
            cells.unit_price,
            cells.quantity,
            cells.total
        ));
    }
    lines.push(rule);

    let label_width = TABLE_WIDTH - COL_TOTAL - 1;
    lines.push(format!(
        "{:>label_width$} {:>COL_TOTAL$}",
        "TỔNG CỘNG:",
        format_dong(sheet.total_amount())
    ));
    if sheet.shows_advance() {
        lines.push(format!(
            "{:>label_width$} {:>COL_TOTAL$}",
            "ĐÃ TẠM ỨNG:",
            format_dong(sheet.advance_amount)
        ));
        lines.push(format!(
            "{:>label_width$} {:>COL_TOTAL$}",
            "CÒN LẠI:",
            format_dong(sheet.remaining_amount())
        ));
    }
    lines.push(format!("Bằng chữ: \"{}\"", sheet.money_text()));
    lines.push(String::new());

    lines.push("THÔNG TIN THANH TOÁN:".to_string());
    lines.push(format!("  Ngân hàng:      {}", or_placeholder(&sheet.bank_name)));
    lines.push(format!("  Số tài khoản:   {}", or_placeholder(&sheet.account_number)));
    lines.push(format!(
        "  Chủ tài khoản:  {}",
        or_placeholder(&sheet.account_holder.to_uppercase())
    ));
    lines.push(String::new());

    let signer_width = 30;
    let signer_indent = TABLE_WIDTH - signer_width;
    lines.push(format!(
        "{:signer_indent$}{:^signer_width$}",
        "", "NGƯỜI LẬP BIỂU"
    ));
    lines.push(String::new());
    lines.push(String::new());
    lines.push(format!(
        "{:signer_indent$}{:^signer_width$}",
        "", sheet.creator_name
    ));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Render a sheet as a standalone HTML document laid out for A4 printing.
pub fn render_html(sheet: &SettlementSheet) -> String {
    let max_width = match sheet.orientation {
        Orientation::Landscape => "1120px",
        Orientation::Portrait => "850px",
    };

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"vi\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{}</title>\n", escape_html(&sheet.title)));
    html.push_str("<style>\n");
    html.push_str(&sheet.orientation.page_css());
    html.push('\n');
    html.push_str(&format!(
        "body {{ font-family: \"Times New Roman\", serif; font-size: 13pt; margin: 0 auto; padding: 16px; max-width: {}; }}\n",
        max_width
    ));
    html.push_str(STYLESHEET);
    html.push_str("</style>\n</head>\n<body>\n");

    html.push_str(&format!("<h1>{}</h1>\n", escape_html(&sheet.title)));
    html.push_str(&format!(
        "<p class=\"date\">{}</p>\n",
        escape_html(&sheet.formatted_date())
    ));
    html.push_str(&format!(
        "<p class=\"recipient\"><strong>Kính gửi:</strong> {}</p>\n",
        escape_html(or_placeholder(&sheet.recipient))
    ));

    html.push_str("<table class=\"rows\">\n<thead><tr>");
    for heading in [
        "STT",
        "Nội dung công việc",
        "Kích thước<br>(m)",
        "Diện tích<br>(m²)",
        "Đơn giá",
        "SL",
        "Thành tiền",
    ] {
        html.push_str(&format!("<th>{}</th>", heading));
    }
    html.push_str("</tr></thead>\n<tbody>\n");
    for (index, row) in sheet.rows().iter().enumerate() {
        html.push_str(&render_html_row(index, row));
    }
    html.push_str("</tbody>\n</table>\n");

    html.push_str("<table class=\"totals\">\n");
    html.push_str(&format!(
        "<tr><th>Tổng cộng:</th><td>{}</td></tr>\n",
        format_dong(sheet.total_amount())
    ));
    if sheet.shows_advance() {
        html.push_str(&format!(
            "<tr><th>Đã tạm ứng:</th><td>{}</td></tr>\n",
            format_dong(sheet.advance_amount)
        ));
        html.push_str(&format!(
            "<tr class=\"remaining\"><th>Còn lại:</th><td>{}</td></tr>\n",
            format_dong(sheet.remaining_amount())
        ));
    }
    html.push_str("</table>\n");
    html.push_str(&format!(
        "<p class=\"in-words\"><strong>Bằng chữ:</strong> \"{}\"</p>\n",
        escape_html(&sheet.money_text())
    ));

    html.push_str("<div class=\"footer\">\n<div class=\"payment\">\n");
    html.push_str("<h4>Thông tin thanh toán:</h4>\n");
    for (label, value) in [
        ("Ngân hàng:", sheet.bank_name.clone()),
        ("Số tài khoản:", sheet.account_number.clone()),
        ("Chủ tài khoản:", sheet.account_holder.to_uppercase()),
    ] {
        html.push_str(&format!(
            "<p><span class=\"label\">{}</span> {}</p>\n",
            label,
            escape_html(or_placeholder(&value))
        ));
    }
    html.push_str("</div>\n<div class=\"signer\">\n<p class=\"role\">Người lập biểu</p>\n");
    html.push_str(&format!(
        "<p class=\"name\">{}</p>\n",
        escape_html(&sheet.creator_name)
    ));
    html.push_str("</div>\n</div>\n</body>\n</html>\n");
    html
}

fn render_html_row(index: usize, row: &SettlementRow) -> String {
    let cells = RowCells::new(row);
    let content = escape_html(&row.content);
    match row.mode {
        InputMode::Manual => format!(
            "<tr><td class=\"stt\">{}</td><td>{}</td><td colspan=\"4\"></td><td class=\"num\">{}</td></tr>\n",
            index + 1,
            content,
            cells.total
        ),
        _ => format!(
            "<tr><td class=\"stt\">{}</td><td>{}</td><td class=\"center\">{}</td><td class=\"center\">{}</td><td class=\"num\">{}</td><td class=\"center\">{}</td><td class=\"num\">{}</td></tr>\n",
            index + 1,
            content,
            cells.size,
            cells.area,
            cells.unit_price,
            cells.quantity,
            cells.total
        ),
    }
}

const STYLESHEET: &str = "\
h1 { text-align: center; text-transform: uppercase; font-size: 18pt; margin-bottom: 4px; }
.date { text-align: center; font-style: italic; margin-top: 0; }
table.rows { width: 100%; border-collapse: collapse; table-layout: fixed; }
table.rows th, table.rows td { border: 1px solid #000; padding: 4px 6px; }
table.rows th { background: #f3f4f6; }
td.stt, td.center { text-align: center; }
td.num { text-align: right; }
tr { break-inside: avoid; }
table.totals { margin-left: auto; margin-top: 8px; }
table.totals th { text-align: left; text-transform: uppercase; padding-right: 24px; }
table.totals td { text-align: right; font-weight: bold; min-width: 180px; }
tr.remaining th, tr.remaining td { border-top: 1px solid #000; }
.in-words { text-align: right; font-style: italic; }
.footer { display: flex; justify-content: space-between; align-items: flex-start; break-inside: avoid; }
.payment h4 { text-transform: uppercase; margin: 0 0 8px 0; }
.payment p { margin: 2px 0; white-space: nowrap; }
.payment .label { display: inline-block; width: 135px; }
.signer { text-align: center; width: 240px; }
.signer .role { font-weight: bold; text-transform: uppercase; margin-bottom: 64px; }
";

fn or_placeholder(value: &str) -> &str {
    if value.trim().is_empty() {
        EMPTY_FIELD
    } else {
        value
    }
}

pub(crate) fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
