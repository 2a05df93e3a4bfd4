//! Static payloads served by the informational endpoints.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct OperationInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub examples: &'static [&'static str],
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleProblem {
    pub problem: &'static str,
    pub expected_operation: &'static str,
    pub expected_result: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct EndpointInfo {
    pub method: &'static str,
    pub path: &'static str,
    pub description: &'static str,
}

pub const OPERATIONS: &[OperationInfo] = &[
    OperationInfo {
        name: "arithmetic",
        description: "Addition, subtraction, multiplication, division and powers",
        examples: &["What is 15% of 240?", "Calculate 2^10 - 24"],
    },
    OperationInfo {
        name: "algebra",
        description: "Simplifying, expanding and factoring expressions",
        examples: &["Factor x^2 - 5x + 6", "Expand (x + 2)(x - 3)"],
    },
    OperationInfo {
        name: "equation",
        description: "Solving linear, quadratic and simultaneous equations",
        examples: &["Solve 2x + 5 = 13", "Solve x^2 - 4 = 0"],
    },
    OperationInfo {
        name: "derivative",
        description: "Symbolic differentiation",
        examples: &["What is the derivative of x^3?", "Differentiate sin(x) * x"],
    },
    OperationInfo {
        name: "integral",
        description: "Indefinite and definite integration",
        examples: &["Integrate 2x dx", "Integrate x^2 from 0 to 3"],
    },
    OperationInfo {
        name: "limit",
        description: "Limits of functions",
        examples: &["Limit of sin(x)/x as x approaches 0"],
    },
    OperationInfo {
        name: "statistics",
        description: "Mean, median, variance and standard deviation",
        examples: &["What is the mean of 3, 7, 8, 10?"],
    },
    OperationInfo {
        name: "matrix",
        description: "Determinants, products and inverses of small matrices",
        examples: &["Determinant of [[1, 2], [3, 4]]"],
    },
];

pub const EXAMPLES: &[ExampleProblem] = &[
    ExampleProblem {
        problem: "What is 25 * 4?",
        expected_operation: "multiplication",
        expected_result: "100",
    },
    ExampleProblem {
        problem: "Solve 2x + 5 = 13",
        expected_operation: "equation",
        expected_result: "x = 4",
    },
    ExampleProblem {
        problem: "What is the derivative of x^2?",
        expected_operation: "derivative",
        expected_result: "2x",
    },
    ExampleProblem {
        problem: "Integrate 2x dx",
        expected_operation: "integral",
        expected_result: "x^2 + C",
    },
    ExampleProblem {
        problem: "Limit of sin(x)/x as x approaches 0",
        expected_operation: "limit",
        expected_result: "1",
    },
    ExampleProblem {
        problem: "What is the mean of 3, 7, 8, 10?",
        expected_operation: "mean",
        expected_result: "7",
    },
];

pub const ENDPOINTS: &[EndpointInfo] = &[
    EndpointInfo {
        method: "GET",
        path: "/",
        description: "API documentation",
    },
    EndpointInfo {
        method: "POST",
        path: "/solve",
        description: "Solve a natural-language math problem",
    },
    EndpointInfo {
        method: "GET",
        path: "/health",
        description: "Service status and configuration",
    },
    EndpointInfo {
        method: "GET",
        path: "/operations",
        description: "Supported operation types",
    },
    EndpointInfo {
        method: "GET",
        path: "/examples",
        description: "Example problems with expected answers",
    },
];

pub fn endpoint_paths() -> Vec<String> {
    ENDPOINTS
        .iter()
        .map(|e| format!("{} {}", e.method, e.path))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_operation_has_examples() {
        assert!(OPERATIONS.iter().all(|op| !op.examples.is_empty()));
    }

    #[test]
    fn test_endpoint_paths_include_solve() {
        assert!(endpoint_paths().contains(&"POST /solve".to_string()));
    }
}
