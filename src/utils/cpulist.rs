use crate::error::{PlacementError, Result};

/// Parse a compact cpu list such as `0-3,5` into core numbers.
///
/// Ranges may be written backwards (`3-1`), single items keep their order.
pub fn parse_cpu_list(value: &str) -> Result<Vec<usize>> {
    let value = value.trim();
    let mut cores = Vec::new();
    if value.is_empty() {
        return Ok(cores);
    }

    for item in value.split(',') {
        let item = item.trim();
        match item.split_once('-') {
            Some((lo, hi)) => {
                let lo = parse_core(lo, value)?;
                let hi = parse_core(hi, value)?;
                let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
                cores.extend(lo..=hi);
            }
            None => cores.push(parse_core(item, value)?),
        }
    }
    Ok(cores)
}

fn parse_core(item: &str, whole: &str) -> Result<usize> {
    item.trim()
        .parse::<usize>()
        .map_err(|_| PlacementError::invalid_cpu_list(whole))
}

/// Format core numbers as a sorted, deduplicated compact list (`0-2,5-7,9`).
pub fn format_cpu_list(cores: &[usize]) -> String {
    let mut sorted = cores.to_vec();
    sorted.sort_unstable();
    sorted.dedup();

    let mut parts = Vec::new();
    let mut iter = sorted.into_iter();
    let Some(first) = iter.next() else {
        return String::new();
    };
    let (mut start, mut end) = (first, first);
    for core in iter {
        if core == end + 1 {
            end = core;
            continue;
        }
        parts.push(range_label(start, end));
        start = core;
        end = core;
    }
    parts.push(range_label(start, end));
    parts.join(",")
}

fn range_label(start: usize, end: usize) -> String {
    if start == end {
        start.to_string()
    } else {
        format!("{start}-{end}")
    }
}

/// Map a task number to its one-letter label: `A-Z`, then `a-z`, then `0-9`.
pub fn task_letter(task: usize) -> Result<char> {
    let offset = |base: u8, n: usize| char::from(base + n as u8);
    match task {
        0..=25 => Ok(offset(b'A', task)),
        26..=51 => Ok(offset(b'a', task - 26)),
        52..=61 => Ok(offset(b'0', task - 52)),
        _ => Err(PlacementError::invalid_argument(format!(
            "task number {task} has no letter (max 61)"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_letter_ranges() {
        assert_eq!(task_letter(0).unwrap(), 'A');
        assert_eq!(task_letter(25).unwrap(), 'Z');
        assert_eq!(task_letter(26).unwrap(), 'a');
        assert_eq!(task_letter(51).unwrap(), 'z');
        assert_eq!(task_letter(52).unwrap(), '0');
        assert_eq!(task_letter(61).unwrap(), '9');
        assert!(matches!(
            task_letter(62),
            Err(PlacementError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn format_cpu_list_compacts_ranges() {
        assert_eq!(format_cpu_list(&[0, 1, 2, 5, 6, 7, 9]), "0-2,5-7,9");
        assert_eq!(format_cpu_list(&[6, 5, 0, 1, 9, 7, 2]), "0-2,5-7,9");
        assert_eq!(format_cpu_list(&[]), "");
        assert_eq!(format_cpu_list(&[0]), "0");
        assert_eq!(format_cpu_list(&[1, 1, 9]), "1,9");
    }

    #[test]
    fn parse_cpu_list_expands_ranges() {
        assert_eq!(parse_cpu_list("0-3,5").unwrap(), vec![0, 1, 2, 3, 5]);
        assert_eq!(parse_cpu_list("5,2,0,1").unwrap(), vec![5, 2, 0, 1]);
        assert_eq!(parse_cpu_list("3-1").unwrap(), vec![1, 2, 3]);
        assert_eq!(parse_cpu_list("1").unwrap(), vec![1]);
        assert!(parse_cpu_list("").unwrap().is_empty());
    }

    #[test]
    fn parse_cpu_list_rejects_garbage() {
        assert!(matches!(
            parse_cpu_list("a-c"),
            Err(PlacementError::InvalidCpuList { value }) if value == "a-c"
        ));
    }
}
