/// Executable names of the calculator across Windows editions.
/// `Calculator.exe` is listed alongside `calculator.exe` on purpose; matching
/// folds case anyway.
pub const KNOWN_PROCESS_NAMES: [&str; 5] = [
    "calc.exe",                        // classic Win32 calculator
    "calculator.exe",                  // Windows 10/11
    "Calculator.exe",
    "calculatorapp.exe",               // UWP
    "Microsoft.WindowsCalculator.exe", // Store package
];

/// Returns true iff `name` equals one of [`KNOWN_PROCESS_NAMES`] ignoring case.
/// Exact match only: no prefix or substring matching.
pub fn is_target_process(name: &str) -> bool {
    if name.is_empty() {
        return false;
    }
    let name = name.to_lowercase();
    KNOWN_PROCESS_NAMES
        .iter()
        .any(|known| known.to_lowercase() == name)
}
