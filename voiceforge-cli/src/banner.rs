use terminal_size::{terminal_size, Width};

pub struct BannerInfo {
    pub version: String,
    pub profile: Option<String>,
    pub endpoint: String,
    pub download_dir: String,
}

pub fn print_startup_banner(info: &BannerInfo) {
    let term_width = terminal_size()
        .map(|(Width(w), _)| w as usize)
        .unwrap_or(80);

    // Waveform art lines (fixed width for alignment)
    let wave = [
        r"      |        ",
        r"   |  ||  |    ",
        r" | || |||||| | ",
        r"   |  ||  |    ",
        r"      |        ",
    ];

    let title = format!("\x1b[1;35mVoiceForge\x1b[0m v{}", info.version);

    let profile_line = info
        .profile
        .as_ref()
        .map(|p| format!("\x1b[90mProfile:\x1b[0m   \x1b[33m{}\x1b[0m", p))
        .unwrap_or_default();

    let endpoint_line = format!("\x1b[90mService:\x1b[0m   \x1b[36m{}\x1b[0m", info.endpoint);

    let output = shorten_path(&info.download_dir, term_width.saturating_sub(30));
    let output_line = format!("\x1b[90mOutput:\x1b[0m    {}", output);

    let info_lines: [&str; 5] = [&title, "", &endpoint_line, &output_line, &profile_line];

    println!();
    for (i, wave_line) in wave.iter().enumerate() {
        let info_line = info_lines.get(i).copied().unwrap_or("");
        println!("\x1b[35m{}\x1b[0m    {}", wave_line, info_line);
    }
    println!();
}

fn shorten_path(path: &str, max_len: usize) -> String {
    // Replace home dir with ~
    let home = std::env::var("HOME").unwrap_or_default();
    let path = if !home.is_empty() && path.starts_with(&home) {
        format!("~{}", &path[home.len()..])
    } else {
        path.to_string()
    };

    let char_count = path.chars().count();
    if char_count <= max_len || max_len < 4 {
        path
    } else {
        let tail: String = path.chars().skip(char_count - (max_len - 3)).collect();
        format!("...{tail}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shorten_path_keeps_tail() {
        assert_eq!(shorten_path("/data/audio/renders/tts", 12), "...nders/tts");
        assert_eq!(shorten_path("/data", 12), "/data");
    }

    #[test]
    fn test_shorten_path_counts_chars_not_bytes() {
        assert_eq!(shorten_path("/data/音声ファイル/出力", 11), "...声ファイル/出力");
        assert_eq!(shorten_path("/data/音声/出力", 12), "/data/音声/出力");
    }
}
