#[cfg(test)]
mod tests {
    use crate::assistant::{ExperienceLevel, QuickAction};
    use crate::cli::{Args, Command};
    use crate::config::LLMProvider;
    use clap::Parser;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_args_default_values() {
        let args = Args::try_parse_from(["career-assistant"]).unwrap();

        assert_eq!(args.command, None);
        assert_eq!(args.command(), Command::Chat);
        assert!(args.config.is_none());
        assert!(args.llm_provider.is_none());
        assert!(args.export.is_none());
        assert!(!args.verbose);
    }

    #[test]
    fn test_ask_joins_words() {
        let args =
            Args::try_parse_from(["career-assistant", "ask", "Tell", "me", "about", "Google"])
                .unwrap();

        let action = args.command().into_quick_action().unwrap();
        assert_eq!(
            action,
            Some(QuickAction::Custom {
                question: "Tell me about Google".to_string()
            })
        );
    }

    #[test]
    fn test_ask_requires_question() {
        assert!(Args::try_parse_from(["career-assistant", "ask"]).is_err());
    }

    #[test]
    fn test_interview_level() {
        let args = Args::try_parse_from([
            "career-assistant",
            "interview",
            "Software Engineer",
            "--level",
            "senior",
        ])
        .unwrap();

        assert_eq!(
            args.command(),
            Command::Interview {
                role: "Software Engineer".to_string(),
                level: ExperienceLevel::Senior,
            }
        );

        let args = Args::try_parse_from(["career-assistant", "interview", "Nurse"]).unwrap();
        assert!(matches!(
            args.command(),
            Command::Interview {
                level: ExperienceLevel::Mid,
                ..
            }
        ));

        let error =
            Args::try_parse_from(["career-assistant", "interview", "Nurse", "--level", "guru"])
                .unwrap_err()
                .to_string();
        assert!(error.contains("possible values"));
        assert!(error.contains("entry, mid, senior"));
    }

    #[test]
    fn test_salary_and_resume_commands() {
        let args =
            Args::try_parse_from(["career-assistant", "salary", "Data Scientist", "Remote"])
                .unwrap();
        assert_eq!(
            args.command().into_quick_action().unwrap(),
            Some(QuickAction::Salary {
                role: "Data Scientist".to_string(),
                location: "Remote".to_string(),
            })
        );

        let args = Args::try_parse_from(["career-assistant", "resume", "Designer"]).unwrap();
        assert_eq!(
            args.command().into_quick_action().unwrap(),
            Some(QuickAction::Resume {
                role: "Designer".to_string(),
                experience: String::new(),
            })
        );
    }

    #[test]
    fn test_job_description_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("jd.txt");
        fs::write(&path, "Rust engineer, 5+ years").unwrap();

        let args = Args::try_parse_from([
            "career-assistant",
            "job-description",
            "--file",
            path.to_str().unwrap(),
        ])
        .unwrap();

        assert_eq!(
            args.command().into_quick_action().unwrap(),
            Some(QuickAction::JobDescription {
                description: "Rust engineer, 5+ years".to_string()
            })
        );
    }

    #[test]
    fn test_job_description_needs_input() {
        let args = Args::try_parse_from(["career-assistant", "job-description"]).unwrap();
        assert!(args.command().into_quick_action().is_err());

        let args = Args::try_parse_from([
            "career-assistant",
            "job-description",
            "--file",
            "/definitely/not/here.txt",
        ])
        .unwrap();
        assert!(args.command().into_quick_action().is_err());
    }

    #[test]
    fn test_chat_has_no_quick_action() {
        let args = Args::try_parse_from(["career-assistant", "chat"]).unwrap();
        assert_eq!(args.command().into_quick_action().unwrap(), None);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = Args::try_parse_from([
            "career-assistant",
            "trends",
            "Fintech",
            "--llm-provider",
            "gemini",
            "--verbose",
        ])
        .unwrap();

        assert_eq!(args.llm_provider, Some("gemini".to_string()));
        assert!(args.verbose);
    }

    #[test]
    fn test_into_config_overrides() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("career.toml");
        fs::write(&config_path, "[llm]\ntemperature = 0.1\n").unwrap();

        let args = Args::try_parse_from([
            "career-assistant",
            "--config",
            config_path.to_str().unwrap(),
            "--llm-provider",
            "gemini",
            "--model",
            "gemini-1.5-pro",
            "--llm-api-key",
            "gm-key",
            "--search-api-key",
            "tvly-key",
            "--timeout-seconds",
            "15",
            "--export",
            "out/chat.txt",
        ])
        .unwrap();

        let config = args.into_config().unwrap();

        assert_eq!(config.llm.provider, LLMProvider::Gemini);
        assert_eq!(config.llm.gemini.model, "gemini-1.5-pro");
        assert_eq!(config.llm.gemini.api_key, "gm-key");
        assert_eq!(config.llm.openai.model, "gpt-4o-mini");
        assert_eq!(config.llm.temperature, 0.1);
        assert_eq!(config.llm.timeout_seconds, 15);
        assert_eq!(config.search.api_key, "tvly-key");
        assert_eq!(config.transcript.export_path, PathBuf::from("out/chat.txt"));
        assert!(config.transcript.export_on_exit);
    }

    #[test]
    fn test_into_config_unknown_provider_keeps_default() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("career.toml");
        fs::write(&config_path, "").unwrap();

        let args = Args::try_parse_from([
            "career-assistant",
            "--config",
            config_path.to_str().unwrap(),
            "--llm-provider",
            "anthropic",
            "--temperature",
            "0.3",
        ])
        .unwrap();

        let config = args.into_config().unwrap();
        assert_eq!(config.llm.provider, LLMProvider::OpenAI);
        assert_eq!(config.llm.temperature, 0.3);
        assert!(!config.transcript.export_on_exit);
    }

    #[test]
    fn test_into_config_missing_file_is_error() {
        let args = Args::try_parse_from([
            "career-assistant",
            "--config",
            "/definitely/not/here/career.toml",
        ])
        .unwrap();

        assert!(args.into_config().is_err());
    }
}
