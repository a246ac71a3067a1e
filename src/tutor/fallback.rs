//! Static fallback knowledge base
//!
//! A small keyword-matched answer table for common questions, consulted
//! before any upstream call. Exact match on the normalized query first,
//! then substring containment scanned in table order; first match wins.

/// Keyword/answer pairs, in match-priority order
const FALLBACK_ANSWERS: &[(&str, &str)] = &[
    (
        "hello",
        "Hello! How can I help you with your AKTU studies today?",
    ),
    (
        "hi",
        "Hi there! Ready to learn about computer science and programming?",
    ),
    (
        "what is programming",
        "Programming is the process of creating instructions for computers to follow. It involves writing code in programming languages like C++, Java, Python, etc. to solve problems and create applications.",
    ),
    (
        "what is data structure",
        "Data structures are ways of organizing and storing data so that it can be accessed and modified efficiently. Common data structures include arrays, linked lists, stacks, queues, trees, and graphs.",
    ),
    (
        "what is algorithm",
        "An algorithm is a step-by-step procedure or formula for solving a problem. It's like a recipe that tells the computer exactly what to do to accomplish a specific task.",
    ),
    (
        "aktu syllabus",
        "The AKTU (Dr. A.P.J. Abdul Kalam Technical University) syllabus for Computer Science includes subjects like Data Structures, Algorithms, Operating Systems, Database Management Systems, Computer Networks, and various programming languages.",
    ),
    (
        "c++ basics",
        "C++ is an object-oriented programming language. Basic concepts include variables, data types, loops, functions, classes, and objects. Here's a simple \"Hello World\" program:\n\n#include <iostream>\nusing namespace std;\n\nint main() {\n    cout << \"Hello World!\" << endl;\n    return 0;\n}",
    ),
    (
        "python basics",
        "Python is a high-level, interpreted programming language known for its simplicity. Basic concepts include variables, lists, dictionaries, loops, and functions. Here's a simple example:\n\nprint(\"Hello World!\")\n\n# Variables\nname = \"Student\"\nprint(f\"Hello, {name}!\")",
    ),
    (
        "time complexity",
        "Time complexity measures how the runtime of an algorithm grows as the input size increases. Common complexities include:\n- O(1): Constant time\n- O(log n): Logarithmic time\n- O(n): Linear time\n- O(n²): Quadratic time\n- O(2^n): Exponential time",
    ),
    (
        "space complexity",
        "Space complexity measures the amount of memory an algorithm uses relative to the input size. It includes both auxiliary space and space used by input.",
    ),
];

/// Look up a fallback answer for an already-normalized query
///
/// Returns the answer for the first keyword that matches exactly, then the
/// first whose keyword is contained in the query. `None` means the question
/// has to go upstream.
pub fn lookup(normalized_query: &str) -> Option<&'static str> {
    for (keyword, answer) in FALLBACK_ANSWERS {
        if *keyword == normalized_query {
            return Some(answer);
        }
    }
    for (keyword, answer) in FALLBACK_ANSWERS {
        if normalized_query.contains(keyword) {
            return Some(answer);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_wins() {
        let answer = lookup("hello").unwrap();
        assert!(answer.starts_with("Hello!"));
    }

    #[test]
    fn short_greeting_resolves_to_its_own_entry() {
        let answer = lookup("hi").unwrap();
        assert!(answer.starts_with("Hi there!"));
    }

    #[test]
    fn substring_containment_matches() {
        let answer = lookup("can you explain time complexity to me").unwrap();
        assert!(answer.contains("O(1)"));
    }

    #[test]
    fn first_listed_keyword_wins_on_multiple_substring_hits() {
        // Query contains both "time complexity" and "space complexity";
        // table order decides.
        let answer = lookup("difference between time complexity and space complexity").unwrap();
        assert!(answer.contains("runtime of an algorithm"));
    }

    #[test]
    fn unknown_query_returns_none() {
        assert!(lookup("explain the halting problem").is_none());
    }
}
