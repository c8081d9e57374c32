// Copyright 2025 dentsusoken
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use env_logger;

/// Map a verbosity level to the default `sc2fla` log filter.
///
/// 0=info, 1=debug, 2+=trace. `RUST_LOG` still takes precedence.
pub fn filter_for(verbose: u8) -> &'static str {
    match verbose {
        0 => "sc2fla=info",
        1 => "sc2fla=debug",
        _ => "sc2fla=trace",
    }
}

/// Initialize the logger with the specified verbosity level
///
/// # Arguments
/// * `verbose` - Verbosity level from the command line
/// * `config_verbose` - The `verbose` flag from the persisted settings, which
///   raises the level to at least debug
pub fn setup_logger(verbose: u8, config_verbose: bool) {
    let level = if config_verbose { verbose.max(1) } else { verbose };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter_for(level)))
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_for_levels() {
        assert_eq!(filter_for(0), "sc2fla=info");
        assert_eq!(filter_for(1), "sc2fla=debug");
        assert_eq!(filter_for(2), "sc2fla=trace");
        assert_eq!(filter_for(9), "sc2fla=trace");
    }
}
