#![no_main]

use libfuzzer_sys::fuzz_target;

use chatshield::{detect_video_provider, is_image_url, is_video_file_url, MediaRef};

fuzz_target!(|data: &str| {
    let media = detect_video_provider(data);

    // Only http(s) URLs may classify. The URL parser skips leading control
    // characters and spaces and treats the scheme case-insensitively.
    if is_image_url(data) || is_video_file_url(data) || media.is_some() {
        let scheme_start = data.trim_start_matches(|c: char| c <= ' ').to_ascii_lowercase();
        assert!(scheme_start.starts_with("http:") || scheme_start.starts_with("https:"));
    }

    if let Some(MediaRef::Video { embed_url: Some(embed), .. }) = media {
        assert!(embed.starts_with("https://"));
    }
});
