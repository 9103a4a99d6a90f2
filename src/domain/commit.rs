/// `git log` pretty format producing one `|`-separated record per commit.
pub const LOG_FORMAT: &str = "--pretty=format:%H|%s|%b|%an|%ad";

const FIELD_COUNT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub hash: String,
    pub subject: String,
    pub body: String,
    pub author: String,
    pub date: String,
}

impl Commit {
    /// Parses a single log line. Lines with fewer than five fields yield `None`;
    /// extra separators past the fifth field are ignored.
    pub fn from_log_line(line: &str) -> Option<Self> {
        let fields: Vec<&str> = line.split('|').take(FIELD_COUNT).collect();
        let [hash, subject, body, author, date] = fields.as_slice() else {
            return None;
        };

        Some(Self {
            hash: hash.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
            author: author.to_string(),
            date: date.to_string(),
        })
    }
}

pub fn parse_log(output: &str) -> Vec<Commit> {
    output
        .trim()
        .lines()
        .filter(|line| !line.is_empty())
        .filter_map(|line| match Commit::from_log_line(line) {
            Some(commit) => {
                tracing::trace!(
                    hash = %commit.hash,
                    author = %commit.author,
                    body_len = commit.body.len(),
                    "parsed commit"
                );
                Some(commit)
            }
            None => {
                tracing::trace!(line, fields = FIELD_COUNT, "skipping short log line");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_complete_lines() {
        let output = "abc123|Add widget|Body text|Jane|2024-05-01\n\
                      def456|Fix crash||John|2024-04-30\n";
        let commits = parse_log(output);
        assert_eq!(commits.len(), 2);
        assert_eq!(
            commits[0],
            Commit {
                hash: "abc123".to_string(),
                subject: "Add widget".to_string(),
                body: "Body text".to_string(),
                author: "Jane".to_string(),
                date: "2024-05-01".to_string(),
            }
        );
        assert_eq!(commits[1].body, "");
        assert_eq!(commits[1].date, "2024-04-30");
    }

    #[test]
    fn skips_lines_with_too_few_fields() {
        let output = "abc123|Subject|Body|Jane|2024-05-01\n\
                      continuation of a multi-line body\n\
                      partial|line|only\n\
                      \n\
                      def456|Other||John|2024-04-30";
        let commits = parse_log(output);
        let hashes: Vec<_> = commits.iter().map(|c| c.hash.as_str()).collect();
        assert_eq!(hashes, vec!["abc123", "def456"]);
    }

    #[test]
    fn keeps_first_five_fields_when_more_are_present() {
        let commit = Commit::from_log_line("h|s|b|a|d|extra").unwrap();
        assert_eq!(commit.date, "d");
    }

    #[test]
    fn empty_output_yields_no_commits() {
        assert!(parse_log("").is_empty());
        assert!(parse_log("\n\n").is_empty());
    }
}
