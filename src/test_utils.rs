//! Test helpers shared across unit tests.

/// Build a minimal but well-formed PDF with `pages` empty pages whose
/// MediaBox is `width` x `height` points. The bytes open cleanly in MuPDF,
/// which lets worker and service tests run against real documents without
/// bundling fixture files.
pub fn minimal_pdf(width: u32, height: u32, pages: usize) -> Vec<u8> {
    let mut objects = vec!["<< /Type /Catalog /Pages 2 0 R >>".to_string()];
    let kids: Vec<String> = (0..pages).map(|i| format!("{} 0 R", i + 3)).collect();
    objects.push(format!(
        "<< /Type /Pages /Kids [{}] /Count {pages} >>",
        kids.join(" ")
    ));
    for _ in 0..pages {
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {width} {height}] >>"
        ));
    }

    let mut buf = String::from("%PDF-1.4\n");
    let mut offsets = Vec::new();
    for (i, body) in objects.iter().enumerate() {
        offsets.push(buf.len());
        buf.push_str(&format!("{} 0 obj\n{body}\nendobj\n", i + 1));
    }

    let xref_pos = buf.len();
    buf.push_str(&format!("xref\n0 {}\n", objects.len() + 1));
    buf.push_str("0000000000 65535 f \n");
    for off in offsets {
        buf.push_str(&format!("{off:010} 00000 n \n"));
    }
    buf.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_pos}\n%%EOF\n",
        objects.len() + 1
    ));

    buf.into_bytes()
}
