//! Canonical profile sample data shared across test suites.

use std::collections::BTreeMap;

use profile_model::{
    CanonicalProfile, CareerEntry, CertificationEntry, CurrentPosition, EducationRecord,
    PersonalInfo, Summary,
};

/// A realistic canonical profile: two careers (one open-ended), grouped
/// skills that all resolve through the built-in catalog, one education
/// record and one certification.
pub fn sample_profile() -> CanonicalProfile {
    let mut skills = BTreeMap::new();
    skills.insert(
        "Cloud".to_string(),
        vec!["AWS EC2".to_string(), "Docker".to_string()],
    );
    skills.insert("Data".to_string(), vec!["Redis".to_string()]);

    CanonicalProfile {
        personal: PersonalInfo {
            name: "김민준".to_string(),
            email: "minjun.kim@example.com".to_string(),
            phone: "010-1234-5678".to_string(),
        },
        current: CurrentPosition {
            company: "(주)클라우드브릿지".to_string(),
            position: "DevOps".to_string(),
        },
        summary: Summary {
            total_experience: "8년차".to_string(),
            profile_statement: "인프라 자동화와 운영 안정성에 집중하는 엔지니어입니다."
                .to_string(),
            expertise: vec!["IaC".to_string(), "관측성".to_string()],
        },
        skills,
        careers: vec![
            CareerEntry {
                company: "(주)클라우드브릿지".to_string(),
                role: "DevOps".to_string(),
                project: "배포 파이프라인 구축".to_string(),
                period: "2021.03 ~ 현재".to_string(),
                description: "쿠버네티스 기반 배포 자동화.".to_string(),
            },
            CareerEntry {
                company: "네오시큐어".to_string(),
                role: "보안 엔지니어".to_string(),
                project: "보안 관제 시스템".to_string(),
                period: "2017.01 ~ 2021.02".to_string(),
                description: "침해 대응 및 관제 운영.".to_string(),
            },
        ],
        education: EducationRecord {
            school: "한국대학교".to_string(),
            major: "컴퓨터공학".to_string(),
            status: "졸업".to_string(),
            start_date: "2010.03".to_string(),
        },
        certifications: vec![CertificationEntry {
            name: "정보처리기사".to_string(),
            issuer: "한국산업인력공단".to_string(),
            date: "2016.05".to_string(),
        }],
    }
}
