use std::{fs, io, path::Path, process::ExitCode};

use chronicler_distance::{
    calculate, export, parse_with_limits, upload, wire, ExportFormat, ParseLimits, UploadPolicy,
};
use miette::{Context, IntoDiagnostic};

/// Applies the upload policy to `path` and returns its text.
#[tracing::instrument(skip(policy))]
fn load(path: &Path, policy: &UploadPolicy) -> miette::Result<String> {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let size = fs::metadata(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("reading {}", path.display()))?
        .len();

    policy.check(&name, None, usize::try_from(size).unwrap_or(usize::MAX))?;

    let bytes = fs::read(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("reading {}", path.display()))?;
    Ok(upload::decode(&bytes)?.to_owned())
}

pub fn calculate_file(
    path: &Path,
    policy: &UploadPolicy,
    limits: &ParseLimits,
    format: ExportFormat,
    output: Option<&Path>,
) -> miette::Result<()> {
    let text = load(path, policy)?;
    let lists = parse_with_limits(&text, limits)?;
    let result = calculate(&lists)?;
    let rendered = export::render(&result, format)?;

    match output {
        Some(out) => {
            fs::write(out, rendered)
                .into_diagnostic()
                .wrap_err_with(|| format!("writing {}", out.display()))?;
            tracing::info!(path = %out.display(), "export written");
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

pub fn preview_file(
    path: &Path,
    policy: &UploadPolicy,
    limits: &ParseLimits,
    lines: usize,
) -> miette::Result<()> {
    let text = load(path, policy)?;
    let lists = parse_with_limits(&text, &limits.with_max_lines(lines))?;

    println!("{:>12}  {:>12}", "List 1", "List 2");
    for (a, b) in lists.list1.iter().zip(&lists.list2) {
        println!("{a:>12}  {b:>12}");
    }
    Ok(())
}

pub fn api(input: Option<&Path>, limits: &ParseLimits) -> miette::Result<ExitCode> {
    let body = match input {
        Some(path) => fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("reading {}", path.display()))?,
        None => io::read_to_string(io::stdin())
            .into_diagnostic()
            .wrap_err("reading request from stdin")?,
    };

    let response = wire::handle_json(&body, limits);
    println!("{}", serde_json::to_string_pretty(&response).into_diagnostic()?);

    Ok(if response.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

pub fn transliterate(words: &[String]) {
    println!("{}", chronicler_tengwar::transliterate(&words.join(" ")));
}
