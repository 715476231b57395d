//! Canned analysis output. The demo has no document pipeline; every run of
//! the mock analysis returns this posting and these five candidates.

use super::domain::{
    Candidate, CandidateId, CandidateSkill, JobPosting, RequiredSkill, SkillImportance,
};

pub fn sample_job() -> JobPosting {
    JobPosting {
        title: "Senior Frontend Developer".to_string(),
        company: Some("Tech Innovations Inc.".to_string()),
        location: Some("San Francisco, CA (Remote)".to_string()),
        job_type: Some("Full-time".to_string()),
        summary: "We are looking for an experienced Frontend Developer to join our growing team. \
                  The ideal candidate will have strong experience with React, TypeScript, and \
                  modern frontend development practices."
            .to_string(),
        required_skills: vec![
            RequiredSkill::new("React", SkillImportance::Critical),
            RequiredSkill::new("TypeScript", SkillImportance::Critical),
            RequiredSkill::new("CSS/SCSS", SkillImportance::Critical),
            RequiredSkill::new("RESTful APIs", SkillImportance::Preferred),
            RequiredSkill::new("GraphQL", SkillImportance::Preferred),
            RequiredSkill::new("Responsive Design", SkillImportance::Critical),
            RequiredSkill::new("Unit Testing", SkillImportance::Preferred),
            RequiredSkill::new("CI/CD", SkillImportance::Bonus),
            RequiredSkill::new("Next.js", SkillImportance::Bonus),
        ],
        responsibilities: vec![
            "Develop and maintain responsive web applications using React and TypeScript"
                .to_string(),
            "Collaborate with designers to implement UI/UX designs".to_string(),
            "Write clean, maintainable, and efficient code".to_string(),
            "Work with backend developers to integrate frontend with APIs".to_string(),
            "Participate in code reviews and provide constructive feedback".to_string(),
        ],
        qualifications: vec![
            "5+ years of experience in frontend development".to_string(),
            "3+ years of experience with React".to_string(),
            "Strong proficiency in TypeScript".to_string(),
            "Experience with modern frontend build tools and workflows".to_string(),
            "Bachelor's degree in Computer Science or equivalent experience".to_string(),
        ],
    }
}

pub fn sample_candidates() -> Vec<Candidate> {
    vec![
        Candidate {
            id: CandidateId("1".to_string()),
            name: "Alex Johnson".to_string(),
            email: "alex.johnson@example.com".to_string(),
            phone: Some("415-555-1234".to_string()),
            skills: vec![
                CandidateSkill::new("React", true),
                CandidateSkill::new("TypeScript", true),
                CandidateSkill::new("GraphQL", true),
                CandidateSkill::new("Next.js", true),
                CandidateSkill::new("CSS/SCSS", true),
                CandidateSkill::new("Unit Testing", true),
                CandidateSkill::new("Redux", false),
            ],
            experience: "7 years of frontend development with 5 years of React experience. \
                         Led a team of 5 developers at TechCorp."
                .to_string(),
            match_score: 92,
        },
        Candidate {
            id: CandidateId("2".to_string()),
            name: "Jamie Smith".to_string(),
            email: "jamie.smith@example.com".to_string(),
            phone: Some("415-555-5678".to_string()),
            skills: vec![
                CandidateSkill::new("React", true),
                CandidateSkill::new("JavaScript", false),
                CandidateSkill::new("CSS/SCSS", true),
                CandidateSkill::new("RESTful APIs", true),
                CandidateSkill::new("Responsive Design", true),
                CandidateSkill::new("Angular", false),
            ],
            experience: "4 years of frontend development with React and Angular. \
                         Worked on e-commerce platforms."
                .to_string(),
            match_score: 78,
        },
        Candidate {
            id: CandidateId("3".to_string()),
            name: "Morgan Williams".to_string(),
            email: "morgan.williams@example.com".to_string(),
            phone: Some("415-555-9012".to_string()),
            skills: vec![
                CandidateSkill::new("React", true),
                CandidateSkill::new("TypeScript", true),
                CandidateSkill::new("CSS/SCSS", true),
                CandidateSkill::new("RESTful APIs", true),
                CandidateSkill::new("Vue.js", false),
                CandidateSkill::new("Webpack", false),
            ],
            experience: "3 years of frontend development. Created responsive web applications \
                         for finance sector."
                .to_string(),
            match_score: 67,
        },
        Candidate {
            id: CandidateId("4".to_string()),
            name: "Taylor Reynolds".to_string(),
            email: "taylor.reynolds@example.com".to_string(),
            phone: Some("415-555-3456".to_string()),
            skills: vec![
                CandidateSkill::new("React", true),
                CandidateSkill::new("TypeScript", true),
                CandidateSkill::new("GraphQL", true),
                CandidateSkill::new("CSS/SCSS", true),
                CandidateSkill::new("CI/CD", true),
                CandidateSkill::new("React Native", false),
            ],
            experience: "6 years of frontend development. Specialized in building scalable \
                         React applications."
                .to_string(),
            match_score: 85,
        },
        Candidate {
            id: CandidateId("5".to_string()),
            name: "Jordan Lee".to_string(),
            email: "jordan.lee@example.com".to_string(),
            phone: Some("415-555-7890".to_string()),
            skills: vec![
                CandidateSkill::new("JavaScript", false),
                CandidateSkill::new("CSS/SCSS", true),
                CandidateSkill::new("jQuery", false),
                CandidateSkill::new("Bootstrap", false),
                CandidateSkill::new("Responsive Design", true),
            ],
            experience: "4 years of web development with focus on responsive design and UI/UX \
                         implementation."
                .to_string(),
            match_score: 51,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_candidates_with_expected_scores() {
        let candidates = sample_candidates();
        let scores: Vec<u8> = candidates.iter().map(|c| c.match_score).collect();
        assert_eq!(scores, vec![92, 78, 67, 85, 51]);
    }

    #[test]
    fn posting_lists_nine_required_skills() {
        assert_eq!(sample_job().required_skills.len(), 9);
    }

    #[test]
    fn two_candidates_know_graphql() {
        let count = sample_candidates()
            .iter()
            .filter(|c| c.skills.iter().any(|s| s.name == "GraphQL"))
            .count();
        assert_eq!(count, 2);
    }
}
